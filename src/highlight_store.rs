use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use log::debug;
use thiserror::Error;

use crate::types::{
    color::Color,
    highlight::{Highlight, HighlightId},
    span::Span,
};

/// Session-wide source of highlight ids. Clones share the same counter, so
/// both sides of a session hand out ids from one strictly increasing
/// sequence. The counter starts at zero and the first issued id is 1.
#[derive(Debug, Clone, Default)]
pub struct HighlightIds {
    last: Arc<AtomicUsize>,
}

impl HighlightIds {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Issue the next id. Ids are never reused.
    #[must_use]
    pub fn issue(&self) -> HighlightId { self.last.fetch_add(1, Ordering::Relaxed) + 1 }

    /// The most recently issued id, or 0 if none has been issued yet.
    #[must_use]
    pub fn last_issued(&self) -> HighlightId { self.last.load(Ordering::Relaxed) }
}

/// Error type for highlights that would break the store's invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Highlight {start}..{end} must cover at least one character")]
    EmptyRange { start: usize, end: usize },

    #[error("Highlight {start}..{end} is out of bounds for a document of length {length}")]
    OutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },
}

/// The highlights of one document in insertion order. Overlapping and even
/// identical ranges are kept side by side; which one is visible is decided
/// when compositing, see [`crate::render`].
#[derive(Debug, Clone, Default)]
pub struct HighlightStore {
    highlights: Vec<Highlight>,
    ids: HighlightIds,
}

impl HighlightStore {
    #[must_use]
    pub fn new(ids: HighlightIds) -> Self {
        Self {
            highlights: Vec::new(),
            ids,
        }
    }

    /// Record a highlight and return its id. The span must be non-empty and
    /// within the document; this is only checked in debug builds, see
    /// [`HighlightStore::try_add`] for the checked version.
    pub fn add(&mut self, span: Span, color: Option<Color>) -> HighlightId {
        debug_assert!(
            span.start < span.end,
            "Highlight {}..{} must cover at least one character",
            span.start,
            span.end
        );

        let id = self.ids.issue();
        self.highlights.push(Highlight::new(id, span, color));
        debug!("Added highlight {id} at {}..{}", span.start, span.end);

        id
    }

    /// Record a highlight after checking it against the length (in code
    /// points) of the document it belongs to.
    ///
    /// # Errors
    ///
    /// If the span is empty or reaches past `document_length`.
    pub fn try_add(
        &mut self,
        span: Span,
        color: Option<Color>,
        document_length: usize,
    ) -> Result<HighlightId, StoreError> {
        if span.start >= span.end {
            return Err(StoreError::EmptyRange {
                start: span.start,
                end: span.end,
            });
        }

        if span.end > document_length {
            return Err(StoreError::OutOfBounds {
                start: span.start,
                end: span.end,
                length: document_length,
            });
        }

        Ok(self.add(span, color))
    }

    /// Delete every highlight intersecting `[start, end)` and return them.
    pub fn remove_overlapping(&mut self, start: usize, end: usize) -> Vec<Highlight> {
        let range = Span::new(start, end);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.highlights)
            .into_iter()
            .partition(|highlight| highlight.span().intersects(&range));

        self.highlights = kept;
        debug!("Removed {} highlight(s) overlapping {start}..{end}", removed.len());

        removed
    }

    pub fn remove(&mut self, id: HighlightId) -> Option<Highlight> {
        let index = self.highlights.iter().position(|highlight| highlight.id == id)?;

        Some(self.highlights.remove(index))
    }

    /// Drop the highlights that don't fit into a document of `length` code
    /// points any more.
    pub fn retain_within(&mut self, length: usize) -> Vec<Highlight> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.highlights)
            .into_iter()
            .partition(|highlight| highlight.end <= length);

        self.highlights = kept;

        removed
    }

    pub fn clear(&mut self) { self.highlights.clear(); }

    #[must_use]
    pub fn get(&self, id: HighlightId) -> Option<&Highlight> {
        self.highlights.iter().find(|highlight| highlight.id == id)
    }

    #[must_use]
    pub fn highlights(&self) -> &[Highlight] { &self.highlights }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> { self.highlights.iter() }

    #[must_use]
    pub fn len(&self) -> usize { self.highlights.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.highlights.is_empty() }
}
