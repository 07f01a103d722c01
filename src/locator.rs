mod case_folding;
pub mod fuzzy;

use log::debug;
use thiserror::Error;

pub use fuzzy::FuzzyOptions;

use crate::{
    addressing::{code_point_len, code_point_offset_of_byte},
    locator::case_folding::fold_case,
    types::span::{ResolvedSpan, Span},
};

/// The literal search that produced a [`Located`] span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Exact,
    CaseInsensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub span: Span,
    pub stage: Stage,
}

/// Error type for snippets that have no literal occurrence in the target
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// Neither literal search succeeded. `plausible` records whether the
    /// approximate matcher saw something roughly similar, which is only
    /// useful for diagnostics.
    #[error("Snippet not found in the target text (similar text present: {plausible})")]
    NotFound { plausible: bool },
}

/// Finds a snippet returned by the semantic matcher in the target text.
///
/// Offsets always come from a literal search: first case-sensitive, then
/// case-insensitive. The approximate matcher only runs after both failed and
/// never yields offsets, because its normalisation loses them.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    options: FuzzyOptions,
}

impl Locator {
    #[must_use]
    pub fn new(options: FuzzyOptions) -> Self { Self { options } }

    #[must_use]
    pub fn options(&self) -> &FuzzyOptions { &self.options }

    /// Locate the first occurrence of `pattern` in `target`.
    ///
    /// # Errors
    ///
    /// [`LocateError::NotFound`] if `pattern` is blank or has no literal
    /// occurrence.
    pub fn locate(&self, target: &str, pattern: &str) -> Result<Located, LocateError> {
        if pattern.trim().is_empty() {
            debug!("Refusing to locate a blank snippet");
            return Err(LocateError::NotFound { plausible: false });
        }

        if let Some(byte_index) = target.find(pattern) {
            let start = code_point_offset_of_byte(target, byte_index);
            let span = Span::new(start, start + code_point_len(pattern));
            debug!("Found exact occurrence at {}..{}", span.start, span.end);

            return Ok(Located {
                span,
                stage: Stage::Exact,
            });
        }

        if let Some(span) = fold_case(target).find(&fold_case(pattern)) {
            debug!(
                "Found case-insensitive occurrence at {}..{}",
                span.start, span.end
            );

            return Ok(Located {
                span,
                stage: Stage::CaseInsensitive,
            });
        }

        let plausible = fuzzy::is_plausible(target, pattern, &self.options);
        debug!("No literal occurrence of the snippet, similar text present: {plausible}");

        Err(LocateError::NotFound { plausible })
    }
}

/// Locate `pattern` in `target` with the default options, returning its
/// code-point span or `None`.
///
/// ```
/// use parallel_highlight::{Span, locate};
///
/// assert_eq!(locate("abcXYZabc", "abc"), Some(Span::new(0, 3)));
/// assert_eq!(locate("Hello World", "hello"), Some(Span::new(0, 5)));
/// assert_eq!(locate("Hello World", "goodbye"), None);
/// ```
#[must_use]
pub fn locate(target: &str, pattern: &str) -> ResolvedSpan {
    Locator::default()
        .locate(target, pattern)
        .ok()
        .map(|located| located.span)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("abcXYZabc", "abc", Some(Span::new(0, 3)); "first exact occurrence")]
    #[test_case("abcXYZabc", "XYZ", Some(Span::new(3, 6)); "middle")]
    #[test_case("Hello World", "hello", Some(Span::new(0, 5)); "case differs")]
    #[test_case("😀 Hello", "Hello", Some(Span::new(2, 7)); "after wide character")]
    #[test_case("老木匠坐下了。", "坐下", Some(Span::new(3, 5)); "cjk")]
    #[test_case("Hello World", "goodbye", None; "absent")]
    #[test_case("Hello World", "", None; "empty")]
    #[test_case("Hello World", " ", None; "blank")]
    fn test_locate(target: &str, pattern: &str, expected: ResolvedSpan) {
        assert_eq!(locate(target, pattern), expected);
    }

    #[test]
    fn test_exact_match_preferred_over_case_insensitive() {
        let located = Locator::default().locate("HELLO hello", "hello").unwrap();

        assert_eq!(located.span, Span::new(6, 11));
        assert_eq!(located.stage, Stage::Exact);
    }

    #[test]
    fn test_case_insensitive_stage() {
        let located = Locator::default().locate("İ HELLO", "hello").unwrap();

        assert_eq!(located.span, Span::new(2, 7));
        assert_eq!(located.stage, Stage::CaseInsensitive);
    }

    #[test]
    fn test_plausible_miss_still_yields_no_span() {
        let locator = Locator::default();

        assert_eq!(
            locator.locate("The old carpenter, sat down.", "old carpentr sat"),
            Err(LocateError::NotFound { plausible: true })
        );
        assert_eq!(
            locator.locate("The old carpenter, sat down.", "a young sailor"),
            Err(LocateError::NotFound { plausible: false })
        );
    }
}
