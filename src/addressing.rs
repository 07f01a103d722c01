//! Conversions between the UTF-16 code-unit offsets reported by browser
//! selections and the Unicode code-point offsets used everywhere else in this
//! crate.
//!
//! A character outside the Basic Multilingual Plane (most emoji, for example)
//! occupies two UTF-16 code units but only one code point. Slicing with
//! code-point offsets therefore never splits a character.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::span::Span;

/// Error type for offsets that can't be mapped onto the text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressingError {
    /// The offset points between the two halves of a surrogate pair
    #[error("Code-unit offset {offset} falls inside a surrogate pair")]
    NotOnBoundary {
        /// The offending offset
        offset: usize,
    },

    /// The offset is past the end of the text
    #[error("Offset {offset} is out of range for a text of length {length}")]
    OutOfRange {
        /// The offending offset
        offset: usize,
        /// The length of the text in the unit of the offset
        length: usize,
    },
}

/// Returns the number of whole code points preceding the UTF-16 code-unit
/// offset `code_unit_offset` in `text`.
///
/// # Panics
///
/// If the offset is out of range or splits a surrogate pair. Offsets come
/// from the UI's own selection mechanics, so this is a caller bug.
#[must_use]
pub fn to_code_point_offset(text: &str, code_unit_offset: usize) -> usize {
    match try_to_code_point_offset(text, code_unit_offset) {
        Ok(offset) => offset,
        Err(error) => panic!("{error}"),
    }
}

/// Checked variant of [`to_code_point_offset`].
///
/// # Errors
///
/// - [`AddressingError::NotOnBoundary`] if the offset splits a surrogate pair
/// - [`AddressingError::OutOfRange`] if the offset is past the end of `text`
pub fn try_to_code_point_offset(
    text: &str,
    code_unit_offset: usize,
) -> Result<usize, AddressingError> {
    let mut code_units = 0;
    let mut code_points = 0;

    for c in text.chars() {
        if code_units == code_unit_offset {
            return Ok(code_points);
        }

        code_units += c.len_utf16();
        code_points += 1;

        if code_units > code_unit_offset {
            return Err(AddressingError::NotOnBoundary {
                offset: code_unit_offset,
            });
        }
    }

    if code_units == code_unit_offset {
        Ok(code_points)
    } else {
        Err(AddressingError::OutOfRange {
            offset: code_unit_offset,
            length: code_units,
        })
    }
}

/// Returns the UTF-16 code-unit offset of the code point at
/// `code_point_offset`.
///
/// # Panics
///
/// If the offset is past the end of `text`.
#[must_use]
pub fn to_code_unit_offset(text: &str, code_point_offset: usize) -> usize {
    match try_to_code_unit_offset(text, code_point_offset) {
        Ok(offset) => offset,
        Err(error) => panic!("{error}"),
    }
}

/// Checked variant of [`to_code_unit_offset`].
///
/// # Errors
///
/// [`AddressingError::OutOfRange`] if the offset is past the end of `text`.
pub fn try_to_code_unit_offset(
    text: &str,
    code_point_offset: usize,
) -> Result<usize, AddressingError> {
    let mut chars = text.chars();
    let mut code_units = 0;

    for _ in 0..code_point_offset {
        let Some(c) = chars.next() else {
            return Err(AddressingError::OutOfRange {
                offset: code_point_offset,
                length: code_point_len(text),
            });
        };
        code_units += c.len_utf16();
    }

    Ok(code_units)
}

/// Length of `text` in code points.
#[must_use]
pub fn code_point_len(text: &str) -> usize { text.chars().count() }

/// Byte offset of the code point at `code_point_offset`, or `text.len()` if
/// the offset is the end of the text.
#[must_use]
pub fn byte_offset(text: &str, code_point_offset: usize) -> usize {
    debug_assert!(
        code_point_offset <= code_point_len(text),
        "Code-point offset ({code_point_offset}) must be within the text or just after the end"
    );

    text.char_indices()
        .nth(code_point_offset)
        .map_or(text.len(), |(index, _)| index)
}

/// Code-point offset of the character starting at byte `byte_offset`.
#[must_use]
pub fn code_point_offset_of_byte(text: &str, byte_offset: usize) -> usize {
    debug_assert!(
        text.is_char_boundary(byte_offset),
        "Byte offset ({byte_offset}) must be on a character boundary"
    );

    text[..byte_offset].chars().count()
}

/// Slice `text` with a half-open range of code-point offsets.
#[must_use]
pub fn slice_code_points(text: &str, start: usize, end: usize) -> &str {
    debug_assert!(start <= end, "Slice start ({start}) must not exceed its end ({end})");

    let start_byte = byte_offset(text, start);
    let length_in_bytes = text[start_byte..]
        .char_indices()
        .nth(end - start)
        .map_or(text.len() - start_byte, |(index, _)| index);

    &text[start_byte..start_byte + length_in_bytes]
}

/// A selection as reported by a UTF-16 based UI, e.g. `selectionStart` and
/// `selectionEnd` of a browser textarea.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeUnitRange {
    pub start: usize,
    pub end: usize,
}

impl CodeUnitRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// Convert the selection to a code-point span. Backwards selections are
    /// normalised so that `start <= end`.
    ///
    /// # Errors
    ///
    /// If either end is not a valid code-unit boundary of `text`.
    pub fn to_span(self, text: &str) -> Result<Span, AddressingError> {
        let start = try_to_code_point_offset(text, self.start.min(self.end))?;
        let end = try_to_code_point_offset(text, self.start.max(self.end))?;

        Ok(Span::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("", 0, 0; "empty text")]
    #[test_case("hello", 3, 3; "ascii")]
    #[test_case("😀abc", 0, 0; "before wide character")]
    #[test_case("😀abc", 2, 1; "after wide character")]
    #[test_case("😀abc", 5, 4; "end of text")]
    #[test_case("老木匠😀", 3, 3; "bmp cjk")]
    #[test_case("a😀😀b", 5, 3; "two wide characters")]
    fn test_to_code_point_offset(text: &str, code_unit_offset: usize, expected: usize) {
        assert_eq!(to_code_point_offset(text, code_unit_offset), expected);
    }

    #[test]
    fn test_inside_surrogate_pair() {
        assert_eq!(
            try_to_code_point_offset("😀abc", 1),
            Err(AddressingError::NotOnBoundary { offset: 1 })
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            try_to_code_point_offset("😀abc", 6),
            Err(AddressingError::OutOfRange {
                offset: 6,
                length: 5
            })
        );
        assert_eq!(
            try_to_code_unit_offset("abc", 4),
            Err(AddressingError::OutOfRange {
                offset: 4,
                length: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "surrogate pair")]
    fn test_unchecked_panics_on_split_character() { let _ = to_code_point_offset("😀", 1); }

    #[test]
    fn test_to_code_unit_offset() {
        assert_eq!(to_code_unit_offset("😀abc", 0), 0);
        assert_eq!(to_code_unit_offset("😀abc", 1), 2);
        assert_eq!(to_code_unit_offset("😀abc", 4), 5);
        assert_eq!(to_code_unit_offset("こんにちは", 2), 2);
    }

    #[test]
    fn test_slicing() {
        assert_eq!(slice_code_points("😀abc", 0, 1), "😀");
        assert_eq!(slice_code_points("😀abc", 1, 4), "abc");
        assert_eq!(slice_code_points("こんにちは", 1, 3), "んに");
        assert_eq!(slice_code_points("abc", 3, 3), "");
        assert_eq!(byte_offset("😀abc", 1), 4);
        assert_eq!(byte_offset("😀abc", 4), 7);
        assert_eq!(code_point_offset_of_byte("😀abc", 5), 2);
    }

    #[test]
    fn test_selection_to_span() {
        let text = "😀 hello";

        assert_eq!(CodeUnitRange::new(3, 8).to_span(text), Ok(Span::new(2, 7)));
        assert_eq!(CodeUnitRange::new(8, 3).to_span(text), Ok(Span::new(2, 7)));
        assert!(CodeUnitRange::new(1, 3).to_span(text).is_err());
    }
}
