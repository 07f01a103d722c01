use std::collections::BTreeMap;

use crate::{
    addressing::code_point_len,
    types::{
        color::Color,
        highlight::{Highlight, HighlightId},
        segment::Segment,
    },
};

/// Ends sort before starts, so that a highlight ending exactly where another
/// one begins never counts as overlapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    End,
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Event {
    position: usize,
    kind: EventKind,
    id: HighlightId,
    color: Option<Color>,
}

impl Event {
    fn sort_key(&self) -> (usize, EventKind, HighlightId) { (self.position, self.kind, self.id) }
}

/// Flatten possibly overlapping highlights into disjoint segments covering
/// `[0, len(document))` exactly once, in order.
///
/// Where highlights overlap, the one with the largest id (the most recently
/// applied one) is visible. Only ids and positions affect the result; the
/// order of `highlights` doesn't. Empty highlights are ignored.
///
/// ```
/// use parallel_highlight::{Color, Highlight, Segment, Span, render};
///
/// let red = Highlight::new(1, Span::new(0, 6), Some(Color::Tomato));
/// let blue = Highlight::new(2, Span::new(3, 9), Some(Color::Aquamarine));
///
/// assert_eq!(
///     render("abcdefghij", &[red, blue]),
///     vec![
///         Segment::new(0, 3, Some(Color::Tomato)),
///         Segment::new(3, 6, Some(Color::Aquamarine)),
///         Segment::new(6, 9, Some(Color::Aquamarine)),
///         Segment::new(9, 10, None),
///     ]
/// );
/// ```
#[must_use]
pub fn render(document: &str, highlights: &[Highlight]) -> Vec<Segment> {
    let length = code_point_len(document);

    let mut events = Vec::with_capacity(highlights.len() * 2);
    for highlight in highlights {
        debug_assert!(
            highlight.end <= length,
            "Highlight {}..{} must be within the document (of length {length})",
            highlight.start,
            highlight.end
        );

        // An empty range covers nothing, and its end event would sort before
        // its start event, leaving it open
        if highlight.start >= highlight.end {
            continue;
        }

        events.push(Event {
            position: highlight.start,
            kind: EventKind::Start,
            id: highlight.id,
            color: highlight.color,
        });
        events.push(Event {
            position: highlight.end,
            kind: EventKind::End,
            id: highlight.id,
            color: highlight.color,
        });
    }
    events.sort_unstable_by_key(Event::sort_key);

    let mut segments = Vec::with_capacity(events.len() + 1);
    let mut active: BTreeMap<HighlightId, Option<Color>> = BTreeMap::new();
    let mut last_position = 0;

    for event in events {
        if event.position > last_position {
            segments.push(Segment::new(
                last_position,
                event.position,
                visible_color(&active),
            ));
            last_position = event.position;
        }

        match event.kind {
            EventKind::Start => {
                active.insert(event.id, event.color);
            }
            EventKind::End => {
                active.remove(&event.id);
            }
        }
    }

    debug_assert!(active.is_empty(), "Every opened highlight must be closed");

    if last_position < length {
        segments.push(Segment::new(last_position, length, None));
    }

    segments
}

fn visible_color(active: &BTreeMap<HighlightId, Option<Color>>) -> Option<Color> {
    active.last_key_value().and_then(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{highlight_store::HighlightStore, types::span::Span};

    fn highlight(id: HighlightId, start: usize, end: usize, color: Color) -> Highlight {
        Highlight::new(id, Span::new(start, end), Some(color))
    }

    #[test]
    fn test_empty() {
        assert!(render("", &[]).is_empty());
        assert_eq!(render("hello", &[]), vec![Segment::new(0, 5, None)]);
    }

    #[test]
    fn test_disjoint_highlights() {
        let highlights = [
            highlight(1, 6, 8, Color::Plum),
            highlight(2, 1, 3, Color::Gold),
            highlight(3, 3, 5, Color::Gold),
        ];

        assert_eq!(
            render("0123456789", &highlights),
            vec![
                Segment::new(0, 1, None),
                Segment::new(1, 3, Some(Color::Gold)),
                Segment::new(3, 5, Some(Color::Gold)),
                Segment::new(5, 6, None),
                Segment::new(6, 8, Some(Color::Plum)),
                Segment::new(8, 10, None),
            ]
        );
    }

    #[test]
    fn test_later_highlight_wins_overlap() {
        let red = highlight(1, 2, 6, Color::Tomato);
        let blue = highlight(2, 4, 8, Color::Aquamarine);
        let expected = vec![
            Segment::new(0, 2, None),
            Segment::new(2, 4, Some(Color::Tomato)),
            Segment::new(4, 6, Some(Color::Aquamarine)),
            Segment::new(6, 8, Some(Color::Aquamarine)),
            Segment::new(8, 10, None),
        ];

        assert_eq!(render("0123456789", &[red, blue]), expected);
        assert_eq!(render("0123456789", &[blue, red]), expected);
    }

    #[test]
    fn test_nested_highlights() {
        let outer = highlight(1, 0, 10, Color::Gold);
        let inner = highlight(2, 3, 5, Color::Plum);

        assert_eq!(
            render("0123456789", &[outer, inner]),
            vec![
                Segment::new(0, 3, Some(Color::Gold)),
                Segment::new(3, 5, Some(Color::Plum)),
                Segment::new(5, 10, Some(Color::Gold)),
            ]
        );

        // A newer highlight covers an older one completely
        let older_inner = highlight(1, 3, 5, Color::Plum);
        let newer_outer = highlight(2, 0, 10, Color::Gold);

        assert_eq!(
            render("0123456789", &[older_inner, newer_outer]),
            vec![
                Segment::new(0, 3, Some(Color::Gold)),
                Segment::new(3, 5, Some(Color::Gold)),
                Segment::new(5, 10, Some(Color::Gold)),
            ]
        );
    }

    #[test]
    fn test_identical_ranges() {
        let first = highlight(1, 1, 3, Color::Gold);
        let second = highlight(2, 1, 3, Color::LightGreen);

        assert_eq!(
            render("abcd", &[second, first]),
            vec![
                Segment::new(0, 1, None),
                Segment::new(1, 3, Some(Color::LightGreen)),
                Segment::new(3, 4, None),
            ]
        );
    }

    #[test]
    fn test_colorless_highlight_on_top() {
        let painted = highlight(1, 0, 4, Color::Gold);
        let colorless = Highlight::new(2, Span::new(1, 2), None);

        assert_eq!(
            render("abcd", &[painted, colorless]),
            vec![
                Segment::new(0, 1, Some(Color::Gold)),
                Segment::new(1, 2, None),
                Segment::new(2, 4, Some(Color::Gold)),
            ]
        );
    }

    #[test]
    fn test_empty_highlight_is_skipped() {
        let empty = Highlight::new(2, Span::new(2, 2), Some(Color::Gold));
        let below = highlight(1, 1, 4, Color::Plum);

        assert_eq!(render("abcdef", &[empty]), vec![Segment::new(0, 6, None)]);
        assert_eq!(
            render("abcdef", &[below, empty]),
            vec![
                Segment::new(0, 1, None),
                Segment::new(1, 4, Some(Color::Plum)),
                Segment::new(4, 6, None),
            ]
        );
    }

    #[test]
    fn test_offsets_are_code_points() {
        assert_eq!(
            render("😀😀ab", &[highlight(1, 1, 3, Color::Gold)]),
            vec![
                Segment::new(0, 1, None),
                Segment::new(1, 3, Some(Color::Gold)),
                Segment::new(3, 4, None),
            ]
        );
    }

    const DOCUMENT_LENGTH: usize = 40;

    fn arbitrary_highlights() -> impl Strategy<Value = Vec<Highlight>> {
        prop::collection::vec(
            (
                0..DOCUMENT_LENGTH,
                1..=DOCUMENT_LENGTH,
                prop::sample::select(Color::PALETTE.to_vec()),
            ),
            0..12,
        )
        .prop_map(|ranges| {
            ranges
                .into_iter()
                .enumerate()
                .map(|(index, (a, b, color))| {
                    let start = a.min(b);
                    let end = a.max(b).max(start + 1).min(DOCUMENT_LENGTH);
                    Highlight::new(index + 1, Span::new(start, end), Some(color))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_segments_cover_document(highlights in arbitrary_highlights()) {
            let document = "x".repeat(DOCUMENT_LENGTH);
            let segments = render(&document, &highlights);

            prop_assert!(!segments.is_empty());
            prop_assert_eq!(segments.first().map(|segment| segment.start), Some(0));
            prop_assert_eq!(segments.last().map(|segment| segment.end), Some(DOCUMENT_LENGTH));
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for segment in &segments {
                prop_assert!(segment.start < segment.end);
            }
        }

        #[test]
        fn test_storage_order_is_irrelevant(highlights in arbitrary_highlights()) {
            let document = "x".repeat(DOCUMENT_LENGTH);
            let mut reversed = highlights.clone();
            reversed.reverse();

            prop_assert_eq!(render(&document, &highlights), render(&document, &reversed));
        }

        #[test]
        fn test_newest_covering_highlight_is_visible(highlights in arbitrary_highlights()) {
            let document = "x".repeat(DOCUMENT_LENGTH);

            for segment in render(&document, &highlights) {
                let expected = highlights
                    .iter()
                    .filter(|highlight| highlight.start <= segment.start && segment.end <= highlight.end)
                    .max_by_key(|highlight| highlight.id)
                    .and_then(|highlight| highlight.color);

                prop_assert_eq!(segment.color, expected);
            }
        }

        #[test]
        fn test_removing_a_highlight_is_like_never_adding_it(
            highlights in arbitrary_highlights(),
            index in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!highlights.is_empty());
            let document = "x".repeat(DOCUMENT_LENGTH);
            let removed = index.index(highlights.len());

            let mut added_then_removed = HighlightStore::default();
            let mut removed_id = None;
            for (i, highlight) in highlights.iter().enumerate() {
                let id = added_then_removed.add(highlight.span(), highlight.color);
                if i == removed {
                    removed_id = Some(id);
                }
            }
            prop_assert!(added_then_removed.remove(removed_id.unwrap_or_default()).is_some());

            let mut never_added = HighlightStore::default();
            for (i, highlight) in highlights.iter().enumerate() {
                if i != removed {
                    never_added.add(highlight.span(), highlight.color);
                }
            }

            prop_assert_eq!(
                render(&document, added_then_removed.highlights()),
                render(&document, never_added.highlights())
            );
        }
    }
}
