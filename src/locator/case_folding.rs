use crate::{addressing::code_point_offset_of_byte, types::span::Span};

/// A lowercased copy of a text that remembers, for every one of its code
/// points, which code point of the original text it was derived from.
/// Lowercasing may expand a character (`İ` becomes `i̇`), so offsets in the
/// folded text can't be used on the original directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText {
    text: String,
    origins: Vec<usize>,
}

/// Lowercase `text` with locale-independent Unicode rules.
pub fn fold_case(text: &str) -> FoldedText {
    let mut folded = String::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());

    for (index, c) in text.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origins.push(index);
        }
    }

    FoldedText {
        text: folded,
        origins,
    }
}

impl FoldedText {
    /// Find the first occurrence of `pattern` and return its span in the
    /// code points of the original (unfolded) text.
    pub fn find(&self, pattern: &FoldedText) -> Option<Span> {
        if pattern.origins.is_empty() {
            return None;
        }

        let byte_index = self.text.find(&pattern.text)?;
        let start = code_point_offset_of_byte(&self.text, byte_index);
        let end = start + pattern.origins.len();

        Some(Span::new(self.origins[start], self.origins[end - 1] + 1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(
            fold_case("Hello World").find(&fold_case("WORLD")),
            Some(Span::new(6, 11))
        );
        assert_eq!(fold_case("Hello").find(&fold_case("bye")), None);
        assert_eq!(fold_case("Hello").find(&fold_case("")), None);
    }

    #[test]
    fn test_expanding_lowercase_keeps_original_offsets() {
        // 'İ' lowercases to two code points
        assert_eq!(
            fold_case("İ Hello").find(&fold_case("hello")),
            Some(Span::new(2, 7))
        );
        assert_eq!(
            fold_case("aİb").find(&fold_case("İb")),
            Some(Span::new(1, 3))
        );
    }
}
