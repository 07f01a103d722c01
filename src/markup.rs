use std::fmt::Write as _;

use crate::{
    compositor::render,
    types::{color::Color, highlight::Highlight, segment::Segment},
};

/// The text of one segment together with its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'a> {
    pub text: &'a str,
    pub color: Option<Color>,
}

/// Slice `document` along the segments produced by [`render`].
#[must_use]
pub fn runs<'a>(document: &'a str, segments: &[Segment]) -> Vec<Run<'a>> {
    let boundaries: Vec<usize> = document
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(document.len()))
        .collect();

    segments
        .iter()
        .map(|segment| Run {
            text: &document[boundaries[segment.start]..boundaries[segment.end]],
            color: segment.color,
        })
        .collect()
}

/// Escape the characters that are reserved in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Render `document` with its highlights as an HTML fragment: colored runs
/// become `<mark>` elements and line breaks become `<br/>`.
///
/// ```
/// use parallel_highlight::{Color, Highlight, Span, to_html};
///
/// let highlight = Highlight::new(1, Span::new(0, 1), Some(Color::Gold));
/// assert_eq!(
///     to_html("a<b", &[highlight]),
///     r#"<mark style="background-color: #FFD700; color: inherit;">a</mark>&lt;b"#
/// );
/// ```
#[must_use]
pub fn to_html(document: &str, highlights: &[Highlight]) -> String {
    let segments = render(document, highlights);
    let mut html = String::with_capacity(document.len() * 2);

    for run in runs(document, &segments) {
        let text = escape_html(run.text).replace('\n', "<br/>");
        match run.color {
            Some(color) => {
                let _ = write!(
                    html,
                    r#"<mark style="background-color: {}; color: inherit;">{text}</mark>"#,
                    color.hex()
                );
            }
            None => html.push_str(&text),
        }
    }

    html
}
