use std::time::{Duration, Instant};

use log::{info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    addressing::{AddressingError, CodeUnitRange, code_point_len, slice_code_points, to_code_unit_offset},
    compositor::render,
    highlight_store::{HighlightIds, HighlightStore},
    locator::{LocateError, Locator, Stage},
    markup::to_html,
    matcher::CollaboratorError,
    refiner::refine,
    types::{
        color::{Brush, Color},
        highlight::{Highlight, HighlightId},
        match_candidate::MatchCandidate,
        segment::Segment,
        span::Span,
    },
    utils::side::Side,
};

/// Shown whenever a selection couldn't be matched in the other document.
pub const NO_MATCH_MESSAGE: &str = "No similar text found";

pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(3);

/// Everything the semantic matcher needs to answer one selection, plus what
/// the session needs to apply its answer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    /// The highlight recorded for the selection itself
    pub highlight_id: HighlightId,
    pub source_side: Side,
    pub source_text: String,
    pub target_text: String,
    pub selected_text: String,
    pub selection: Span,
    pub color: Color,
}

impl MatchRequest {
    #[must_use]
    pub fn target_side(&self) -> Side { self.source_side.other() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection was collapsed
    Ignored,
    /// Clear mode: these highlights overlapped the selection and were removed
    Cleared(Vec<Highlight>),
    /// The selection was highlighted and has to be matched in the other
    /// document
    Highlighted(MatchRequest),
}

/// Why a match request didn't produce a highlight. Both reasons look the same
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatch {
    Collaborator(CollaboratorError),
    Locator(LocateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Highlighted {
        side: Side,
        highlight: Highlight,
        stage: Stage,
    },
    NotFound(NoMatch),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Selected,
    Request,
    Response,
    Highlighted,
}

/// One line of the session's activity log.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub side: Side,
    pub text: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone)]
struct Notification {
    dismiss_after: Duration,
    shown_at: Option<Instant>,
}

impl Notification {
    fn message(&self, now: Instant) -> Option<&'static str> {
        self.shown_at
            .filter(|shown_at| now.saturating_duration_since(*shown_at) < self.dismiss_after)
            .map(|_| NO_MATCH_MESSAGE)
    }
}

#[derive(Debug, Clone)]
struct Document {
    text: String,
    highlights: HighlightStore,
}

impl Document {
    fn new(ids: HighlightIds) -> Self {
        Self {
            text: String::new(),
            highlights: HighlightStore::new(ids),
        }
    }
}

/// Two parallel documents with their highlights.
///
/// Selecting text on one side highlights it right away and yields a
/// [`MatchRequest`] for the semantic matcher. Its answer is fed back through
/// [`Session::resolve`], which highlights the matching span on the other side.
/// Answers are applied in whatever order they arrive, even if the selection
/// they belong to has been cleared since.
#[derive(Debug, Clone)]
pub struct Session {
    left: Document,
    right: Document,
    brush: Brush,
    locator: Locator,
    notification: Notification,
    log: Vec<LogEntry>,
}

impl Default for Session {
    fn default() -> Self { Self::new(Locator::default(), DEFAULT_NOTIFICATION_DELAY) }
}

impl Session {
    #[must_use]
    pub fn new(locator: Locator, notification_delay: Duration) -> Self {
        let ids = HighlightIds::new();

        Self {
            left: Document::new(ids.clone()),
            right: Document::new(ids),
            brush: Brush::default(),
            locator,
            notification: Notification {
                dismiss_after: notification_delay,
                shown_at: None,
            },
            log: Vec::new(),
        }
    }

    fn document(&self, side: Side) -> &Document {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn document_mut(&mut self, side: Side) -> &mut Document {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[must_use]
    pub fn text(&self, side: Side) -> &str { &self.document(side).text }

    #[must_use]
    pub fn highlights(&self, side: Side) -> &HighlightStore { &self.document(side).highlights }

    #[must_use]
    pub fn brush(&self) -> Brush { self.brush }

    #[must_use]
    pub fn log(&self) -> &[LogEntry] { &self.log }

    /// Replace a document. Highlights that no longer fit are dropped.
    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        let document = self.document_mut(side);
        document.text = text.into();

        let dropped = document
            .highlights
            .retain_within(code_point_len(&document.text));
        if !dropped.is_empty() {
            info!(
                "Dropped {} highlight(s) past the end of the {side} document",
                dropped.len()
            );
        }
    }

    pub fn set_color(&mut self, color: Color) { self.brush = Brush::Paint(color); }

    pub fn set_brush(&mut self, brush: Brush) { self.brush = brush; }

    pub fn enter_clear_mode(&mut self) { self.brush = Brush::Clear; }

    /// Remove every highlight from both documents and empty the log.
    pub fn clear_all_highlights(&mut self) {
        self.left.highlights.clear();
        self.right.highlights.clear();
        self.log.clear();
    }

    /// Start over with two empty documents.
    pub fn reset_documents(&mut self) {
        self.clear_all_highlights();
        self.left.text.clear();
        self.right.text.clear();
        self.notification.shown_at = None;
    }

    /// Handle a selection reported in UTF-16 code units.
    ///
    /// # Errors
    ///
    /// If either end of the selection isn't a code-unit boundary of the text.
    pub fn select_range(
        &mut self,
        side: Side,
        code_unit_start: usize,
        code_unit_end: usize,
    ) -> Result<SelectionOutcome, AddressingError> {
        let span = CodeUnitRange::new(code_unit_start, code_unit_end).to_span(self.text(side))?;
        if span.is_empty() {
            return Ok(SelectionOutcome::Ignored);
        }

        let color = match self.brush {
            Brush::Clear => {
                let removed = self
                    .document_mut(side)
                    .highlights
                    .remove_overlapping(span.start, span.end);

                return Ok(SelectionOutcome::Cleared(removed));
            }
            Brush::Paint(color) => color,
        };

        let selected_text = slice_code_points(self.text(side), span.start, span.end).to_owned();
        let highlight_id = self.document_mut(side).highlights.add(span, Some(color));
        info!(
            "Highlighted {side} {}..{} with {color}",
            span.start, span.end
        );

        self.log.push(LogEntry {
            kind: LogKind::Selected,
            side,
            text: selected_text.clone(),
            span: Some(span),
        });
        self.log.push(LogEntry {
            kind: LogKind::Request,
            side,
            text: selected_text.clone(),
            span: None,
        });

        Ok(SelectionOutcome::Highlighted(MatchRequest {
            highlight_id,
            source_side: side,
            source_text: self.text(side).to_owned(),
            target_text: self.text(side.other()).to_owned(),
            selected_text,
            selection: span,
            color,
        }))
    }

    /// Apply the semantic matcher's answer to `request`: refine the snippet,
    /// locate it in the current text of the other document and highlight it
    /// there. Failures show the "no similar text" notification as of `now`.
    pub fn resolve(
        &mut self,
        request: &MatchRequest,
        response: Result<MatchCandidate, CollaboratorError>,
        now: Instant,
    ) -> MatchOutcome {
        let target = request.target_side();

        let candidate = match response {
            Ok(candidate) => candidate,
            Err(error) => {
                warn!("Semantic matcher failed: {error}");
                self.log_response(request.source_side, error.to_string());
                return self.not_found(NoMatch::Collaborator(error), now);
            }
        };
        self.log_response(
            request.source_side,
            format!("{} ({})", candidate.snippet, candidate.explanation),
        );

        let candidate = refine(candidate, &request.selected_text);
        let located = match self.locator.locate(self.text(target), &candidate.snippet) {
            Ok(located) => located,
            Err(error) => {
                warn!("Cannot highlight the match for highlight {}: {error}", request.highlight_id);
                return self.not_found(NoMatch::Locator(error), now);
            }
        };

        let document = self.document_mut(target);
        let id = document.highlights.add(located.span, Some(request.color));
        let highlight = Highlight::new(id, located.span, Some(request.color));
        let text = slice_code_points(&document.text, located.span.start, located.span.end).to_owned();

        info!(
            "Matched highlight {} to {target} {}..{}",
            request.highlight_id, located.span.start, located.span.end
        );
        self.log.push(LogEntry {
            kind: LogKind::Highlighted,
            side: target,
            text,
            span: Some(located.span),
        });

        MatchOutcome::Highlighted {
            side: target,
            highlight,
            stage: located.stage,
        }
    }

    fn log_response(&mut self, side: Side, text: String) {
        self.log.push(LogEntry {
            kind: LogKind::Response,
            side,
            text,
            span: None,
        });
    }

    fn not_found(&mut self, reason: NoMatch, now: Instant) -> MatchOutcome {
        self.notification.shown_at = Some(now);
        MatchOutcome::NotFound(reason)
    }

    /// The notification visible at `now`, if any.
    #[must_use]
    pub fn notification(&self, now: Instant) -> Option<&'static str> { self.notification.message(now) }

    #[must_use]
    pub fn render(&self, side: Side) -> Vec<Segment> {
        let document = self.document(side);
        render(&document.text, document.highlights.highlights())
    }

    #[must_use]
    pub fn to_html(&self, side: Side) -> String {
        let document = self.document(side);
        to_html(&document.text, document.highlights.highlights())
    }

    /// Convert a span back to UTF-16 code units, e.g. to scroll a textarea to
    /// a new highlight.
    #[must_use]
    pub fn code_unit_range(&self, side: Side, span: Span) -> CodeUnitRange {
        let text = self.text(side);
        CodeUnitRange::new(
            to_code_unit_offset(text, span.start),
            to_code_unit_offset(text, span.end),
        )
    }
}
