#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{color::Color, span::Span};

/// A unit of compositor output: a span painted with at most one color.
/// Segments of one document never overlap.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub color: Option<Color>,
}

impl Segment {
    #[must_use]
    pub fn new(start: usize, end: usize, color: Option<Color>) -> Self { Self { start, end, color } }

    #[must_use]
    pub fn span(&self) -> Span { Span::new(self.start, self.end) }
}
