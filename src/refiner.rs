use log::debug;

use crate::{
    addressing::code_point_len,
    tokenizer::{Token, whitespace_tokenizer},
    types::match_candidate::MatchCandidate,
};

/// Shrink a candidate that is implausibly long compared to the selection it
/// was derived from.
///
/// When the snippet has more than twice as many whitespace-separated tokens as
/// `original_selection`, it's cut to its first N tokens (N being the token
/// count of the selection) re-joined with single spaces. The advisory offsets
/// move along with the kept prefix. Otherwise the candidate is returned as-is.
///
/// This only looks at token counts and always keeps the prefix; it doesn't
/// search for a better scoring window inside the snippet.
///
/// ```
/// use parallel_highlight::{MatchCandidate, refine};
///
/// let candidate = MatchCandidate::new("the old carpenter sat down", "");
/// assert_eq!(refine(candidate, "carpenter").snippet, "the");
/// ```
#[must_use]
pub fn refine(candidate: MatchCandidate, original_selection: &str) -> MatchCandidate {
    let selection_token_count = whitespace_tokenizer(original_selection).len();
    let candidate_tokens = whitespace_tokenizer(&candidate.snippet);

    if candidate_tokens.len() <= selection_token_count * 2 {
        return candidate;
    }

    debug!(
        "Snippet has {} tokens but the selection only {selection_token_count}, keeping its \
         prefix",
        candidate_tokens.len()
    );

    let kept = &candidate_tokens[..selection_token_count];
    let snippet = kept.iter().map(Token::text).collect::<Vec<_>>().join(" ");

    // Offsets of the kept text as it appears in the original snippet, before
    // whitespace runs were collapsed
    let shift = candidate_tokens.first().map_or(0, Token::char_offset);
    let kept_end = kept.last().map_or(shift, |token| {
        token.char_offset() + code_point_len(token.text())
    });

    let (start, end) = match (candidate.start, candidate.end) {
        (Some(start), Some(_)) => (Some(start + shift), Some(start + kept_end)),
        _ => (None, None),
    };

    MatchCandidate {
        snippet,
        explanation: candidate.explanation,
        start,
        end,
    }
}
