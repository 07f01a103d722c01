use wasm_bindgen::prelude::*;

use crate::types::span::Span;

/// Wrapper type to expose a located `Span` to JS. Offsets are in UTF-16 code
/// units, ready to be used with `setSelectionRange`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsResolvedSpan {
    start: usize,
    end: usize,
}

#[wasm_bindgen]
impl JsResolvedSpan {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self { Self { start, end } }

    #[must_use]
    pub fn start(&self) -> usize { self.start }

    #[must_use]
    pub fn end(&self) -> usize { self.end }
}

impl JsResolvedSpan {
    pub(crate) fn from_span(text: &str, span: Span) -> Self {
        Self {
            start: crate::addressing::to_code_unit_offset(text, span.start),
            end: crate::addressing::to_code_unit_offset(text, span.end),
        }
    }
}
