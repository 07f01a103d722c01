//! The semantic-matching collaborator: given a selection in one document, it
//! suggests a similar snippet in the other one.
//!
//! Its answers are untrusted. The reported offsets are kept only as hints; the
//! span that gets highlighted is always derived by [`crate::Locator`].

#[cfg(feature = "remote")]
mod chat_completion;

#[cfg(feature = "remote")]
use async_trait::async_trait;
#[cfg(feature = "remote")]
pub use chat_completion::{ChatCompletionMatcher, MatcherConfig};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "remote")]
use crate::session::MatchRequest;
use crate::types::match_candidate::MatchCandidate;

/// Error type for failed or unusable collaborator calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Failed to reach the semantic matcher: {0}")]
    Transport(String),

    #[error("Semantic matcher responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Semantic matcher returned an empty response")]
    EmptyResponse,

    #[error("Cannot parse the semantic matcher's response: {0}")]
    Unparseable(String),

    /// The environment variable holding the API key is unset or empty
    #[error("Environment variable {0} must contain an API key")]
    MissingApiKey(String),
}

/// The JSON object the collaborator is asked to return.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub similar_text: String,
    /// Advisory only; a value that isn't a number becomes `None`
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient_offset"))]
    pub start: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient_offset"))]
    pub end: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explanation: String,
}

/// Models sometimes quote offsets or print them as floats. Anything that
/// isn't a whole number drops the hint instead of failing the whole reply.
#[cfg(feature = "serde")]
#[allow(clippy::cast_possible_truncation)]
fn lenient_offset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Offset {
        Integer(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Offset::deserialize(deserializer)? {
        Offset::Integer(value) => Some(value),
        Offset::Float(value) if value.is_finite() && value.fract().abs() < f64::EPSILON => {
            Some(value as i64)
        }
        Offset::Text(value) => value.trim().parse().ok(),
        Offset::Float(_) | Offset::Other(_) => None,
    })
}

impl From<MatchResponse> for MatchCandidate {
    fn from(response: MatchResponse) -> Self {
        let offsets = response
            .start
            .zip(response.end)
            .and_then(|(start, end)| Some((usize::try_from(start).ok()?, usize::try_from(end).ok()?)))
            .filter(|(start, end)| start <= end);

        MatchCandidate {
            snippet: response.similar_text,
            explanation: response.explanation,
            start: offsets.map(|(start, _)| start),
            end: offsets.map(|(_, end)| end),
        }
    }
}

/// Parse the collaborator's reply. Language models like to wrap JSON in
/// Markdown code fences, those are stripped first.
///
/// # Errors
///
/// [`CollaboratorError::EmptyResponse`] for a blank reply and
/// [`CollaboratorError::Unparseable`] if it isn't the expected JSON object.
#[cfg(feature = "remote")]
pub fn parse_match_response(raw: &str) -> Result<MatchCandidate, CollaboratorError> {
    use std::sync::LazyLock;

    use regex::Regex;

    static CODE_FENCE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"```json\s*|\s*```").expect("pattern is valid"));

    let cleaned = CODE_FENCE.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(CollaboratorError::EmptyResponse);
    }

    serde_json::from_str::<MatchResponse>(cleaned)
        .map(MatchCandidate::from)
        .map_err(|error| CollaboratorError::Unparseable(error.to_string()))
}

/// Something that can suggest a snippet of the target text similar to the
/// selected one.
#[cfg(feature = "remote")]
#[async_trait]
pub trait SemanticMatcher: Send + Sync {
    async fn find_similar(&self, request: &MatchRequest) -> Result<MatchCandidate, CollaboratorError>;
}
