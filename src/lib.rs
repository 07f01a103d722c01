//! Colored, possibly overlapping highlights over two parallel texts, and the
//! machinery to carry a highlight from one text to its counterpart in the
//! other.
//!
//! Highlights live in per-document [`HighlightStore`]s and are flattened into
//! disjoint [`Segment`]s by [`render`] for display. A selection in one document
//! is sent to a semantic matcher; the snippet it suggests is trimmed by
//! [`refine`] and located in the other document by the [`Locator`]. A
//! [`Session`] ties these together for a pair of documents.

pub mod addressing;
mod compositor;
mod highlight_store;
mod locator;
mod markup;
mod matcher;
mod refiner;
mod session;
mod tokenizer;
mod types;
mod utils;

pub use addressing::{AddressingError, CodeUnitRange, to_code_point_offset, to_code_unit_offset};
pub use compositor::render;
pub use highlight_store::{HighlightIds, HighlightStore, StoreError};
pub use locator::{FuzzyOptions, LocateError, Located, Locator, Stage, locate};
pub use markup::{Run, escape_html, runs, to_html};
#[cfg(feature = "remote")]
pub use matcher::{ChatCompletionMatcher, MatcherConfig, SemanticMatcher, parse_match_response};
pub use matcher::{CollaboratorError, MatchResponse};
pub use refiner::refine;
pub use session::{
    DEFAULT_NOTIFICATION_DELAY, LogEntry, LogKind, MatchOutcome, MatchRequest, NO_MATCH_MESSAGE,
    NoMatch, SelectionOutcome, Session,
};
pub use tokenizer::{Token, whitespace_tokenizer};
pub use types::{
    color::{Brush, Color, ERASER_HEX, UnknownColor},
    highlight::{Highlight, HighlightId},
    match_candidate::MatchCandidate,
    segment::Segment,
    span::{ResolvedSpan, Span},
};
pub use utils::side::{Side, UnknownSide};

#[cfg(feature = "wasm")]
pub mod wasm;
#[cfg(feature = "remote")]
mod workbench;
#[cfg(feature = "remote")]
pub use workbench::{Selection, Workbench};
