#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Untrusted output of the semantic matcher. The snippet may be empty, may not
/// occur verbatim in the target and may be longer than the selection it was
/// derived from. `start` and `end` are the matcher's own guess and are only
/// advisory.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchCandidate {
    pub snippet: String,
    pub explanation: String,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl MatchCandidate {
    #[must_use]
    pub fn new(snippet: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            explanation: explanation.into(),
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn with_offsets(self, start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..self
        }
    }
}
