//! Expose highlighting and span alignment to WebAssembly. All offsets crossing
//! this boundary are UTF-16 code units, as used by JavaScript strings.
mod types;

use wasm_bindgen::prelude::*;

pub use crate::wasm::types::JsResolvedSpan;
use crate::{
    addressing::{CodeUnitRange, try_to_code_point_offset, try_to_code_unit_offset},
    types::{color::Color, highlight::Highlight, match_candidate::MatchCandidate},
};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// Convert a UTF-16 code-unit offset into a code-point offset. Returns
/// `undefined` if the offset is out of range or splits a surrogate pair.
#[wasm_bindgen(js_name = toCodePointOffset)]
#[must_use]
pub fn to_code_point_offset(text: &str, code_unit_offset: usize) -> Option<usize> {
    set_panic_hook();

    try_to_code_point_offset(text, code_unit_offset).ok()
}

/// Convert a code-point offset into a UTF-16 code-unit offset. Returns
/// `undefined` if the offset is out of range.
#[wasm_bindgen(js_name = toCodeUnitOffset)]
#[must_use]
pub fn to_code_unit_offset(text: &str, code_point_offset: usize) -> Option<usize> {
    set_panic_hook();

    try_to_code_unit_offset(text, code_point_offset).ok()
}

/// WASM wrapper around `crate::locate`.
#[wasm_bindgen]
#[must_use]
pub fn locate(target: &str, pattern: &str) -> Option<JsResolvedSpan> {
    set_panic_hook();

    crate::locate(target, pattern).map(|span| JsResolvedSpan::from_span(target, span))
}

/// WASM wrapper around `crate::refine`, returning only the refined snippet.
#[wasm_bindgen(js_name = refineSnippet)]
#[must_use]
pub fn refine_snippet(snippet: &str, original_selection: &str) -> String {
    set_panic_hook();

    crate::refine(MatchCandidate::new(snippet, ""), original_selection).snippet
}

/// Render `document` with highlights given as parallel arrays of code-unit
/// ranges and colors (palette names or hex codes). Later entries are drawn on
/// top of earlier ones. Entries with an unknown color, an empty range or
/// offsets outside the document are skipped.
#[wasm_bindgen(js_name = renderHtml)]
#[must_use]
pub fn render_html(document: &str, starts: &[u32], ends: &[u32], colors: Vec<String>) -> String {
    set_panic_hook();

    let highlights: Vec<Highlight> = starts
        .iter()
        .zip(ends)
        .zip(colors)
        .enumerate()
        .filter_map(|(index, ((&start, &end), color))| {
            let color = color.parse::<Color>().ok()?;
            let span = CodeUnitRange::new(start as usize, end as usize)
                .to_span(document)
                .ok()
                .filter(|span| !span.is_empty())?;

            Some(Highlight::new(index + 1, span, Some(color)))
        })
        .collect();

    crate::to_html(document, &highlights)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
