#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{color::Color, span::Span};

/// Session-unique identity of a highlight. Later highlights get larger ids.
pub type HighlightId = usize;

/// A colored range of one document. `color` is `None` for a highlight that
/// occupies its range without painting it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub id: HighlightId,
    pub start: usize,
    pub end: usize,
    pub color: Option<Color>,
}

impl Highlight {
    #[must_use]
    pub fn new(id: HighlightId, span: Span, color: Option<Color>) -> Self {
        Self {
            id,
            start: span.start,
            end: span.end,
            color,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span { Span::new(self.start, self.end) }
}
