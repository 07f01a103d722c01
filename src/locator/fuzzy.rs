//! Approximate matching used to judge whether a snippet plausibly occurs in a
//! text at all.
//!
//! Both texts are normalised first (whitespace and punctuation removed,
//! lowercased), which destroys the original offsets. The result of this module
//! is therefore a yes/no signal, never a span.

use std::sync::LazyLock;

use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static IGNORED_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{P}]").expect("pattern is valid"));

/// Tuning of the approximate matcher.
///
/// A match is scored as `errors / pattern_length + |start - location| /
/// distance` and accepted when its score is at most `threshold`. With the
/// defaults, an error-free match starting 300 characters into the normalised
/// text is just at the threshold. Set `ignore_location` to drop the proximity
/// term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    pub threshold: f64,
    pub location: usize,
    pub distance: usize,
    pub ignore_location: bool,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            location: 0,
            distance: 1000,
            ignore_location: false,
        }
    }
}

/// Best approximate occurrence of a pattern, in normalised coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    pub score: f64,
    pub errors: usize,
    pub start: usize,
}

/// Strip whitespace and punctuation and lowercase the rest.
pub fn normalize(text: &str) -> Vec<char> {
    IGNORED_CHARACTERS
        .replace_all(text, "")
        .to_lowercase()
        .chars()
        .collect()
}

/// Whether something roughly similar to `pattern` occurs in `target`.
pub fn is_plausible(target: &str, pattern: &str, options: &FuzzyOptions) -> bool {
    best_match(&normalize(target), &normalize(pattern), options)
        .is_some_and(|found| found.score <= options.threshold)
}

/// Semi-global edit distance (Sellers' algorithm): the pattern has to be
/// matched completely, but may start and end anywhere in `text`. Returns the
/// lowest scoring occurrence.
///
/// * time: `O(N*M)`
/// * space `O(M)`
pub fn best_match(text: &[char], pattern: &[char], options: &FuzzyOptions) -> Option<FuzzyMatch> {
    if pattern.is_empty() {
        return None;
    }

    // Each cell holds (edits, start in `text`) of the cheapest alignment of a
    // pattern prefix ending at the current text position.
    let mut previous: Vec<(usize, usize)> = (0..=pattern.len()).map(|i| (i, 0)).collect();
    let mut current = previous.clone();
    let mut best: Option<FuzzyMatch> = None;

    for (j, &c) in text.iter().enumerate() {
        current[0] = (0, j + 1);

        for i in 1..=pattern.len() {
            let (diagonal_cost, diagonal_start) = previous[i - 1];
            let mut cell = (
                diagonal_cost + usize::from(pattern[i - 1] != c),
                diagonal_start,
            );

            let skip_text = (previous[i].0 + 1, previous[i].1);
            if skip_text.0 < cell.0 {
                cell = skip_text;
            }

            let skip_pattern = (current[i - 1].0 + 1, current[i - 1].1);
            if skip_pattern.0 < cell.0 {
                cell = skip_pattern;
            }

            current[i] = cell;
        }

        let (errors, start) = current[pattern.len()];
        let candidate = FuzzyMatch {
            score: score(errors, start, pattern.len(), options),
            errors,
            start,
        };

        if best.is_none_or(|best| candidate.score < best.score) {
            best = Some(candidate);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    best
}

fn score(errors: usize, start: usize, pattern_length: usize, options: &FuzzyOptions) -> f64 {
    let accuracy = errors as f64 / pattern_length as f64;
    if options.ignore_location {
        return accuracy;
    }

    let proximity = start.abs_diff(options.location);
    if options.distance == 0 {
        return if proximity == 0 { accuracy } else { 1.0 };
    }

    accuracy + proximity as f64 / options.distance as f64
}
