#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of code-point offsets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// The validated result of locating a snippet inside a document; `None`
/// means the snippet couldn't be found.
pub type ResolvedSpan = Option<Span>;

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start ({start}) must not exceed its end ({end})");

        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.end - self.start }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    /// Whether the two spans share at least one code point.
    #[must_use]
    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}
