//! Offset-to-geometry resolution.
//!
//! Maps a match in a page's normalized text (page, char offset, length) back
//! onto page-space highlight rectangles. The page layout is rebuilt from the
//! raw items with the normalizer's own walk, so the resolver needs nothing but
//! the items and the offset.

use crate::error::ResolveError;
use crate::geometry::HighlightRect;
use crate::merge::{DEFAULT_MATCH_MERGE_THRESHOLD, merge_rects};
use crate::normalize::{CharSource, NormalizeOptions, PageLayout};
use crate::search::SearchResult;
use crate::text::PositionedTextItem;

/// Options for resolving matches to rectangles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveOptions {
    /// Normalization the match offsets refer to. Must equal the options the
    /// page text was normalized with.
    pub normalize: NormalizeOptions,
    /// Horizontal gap tolerance for merging a match's fragments. Default: `5.0`.
    pub merge_threshold: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            merge_threshold: DEFAULT_MATCH_MERGE_THRESHOLD,
        }
    }
}

/// A run of consecutive matched chars within one item.
#[derive(Debug, Clone, Copy)]
struct ItemSpan {
    item: usize,
    first: usize,
    last: usize,
}

/// Resolve a normalized-text match to highlight rectangles, or say why not.
///
/// `page_height` is the unscaled page height, used to flip the items'
/// bottom-up baseline coordinates into top-down rectangles. Each item the
/// match touches contributes one rectangle spanning the matched chars, sized
/// by the item's average char width; the rectangles are then merged.
///
/// A match that starts on an inferred space starts at the following item and
/// still takes `match_length` chars from there. A match left without any item
/// text is a [`ResolveError::NoItemText`].
pub fn try_resolve_rects(
    items: &[PositionedTextItem],
    page_number: usize,
    page_height: f64,
    match_offset: usize,
    match_length: usize,
    options: &ResolveOptions,
) -> Result<Vec<HighlightRect>, ResolveError> {
    if match_length == 0 {
        return Err(ResolveError::EmptyMatch);
    }

    let layout = PageLayout::build(items, &options.normalize);
    let len = layout.char_len();
    if match_offset >= len {
        return Err(ResolveError::OffsetOutOfRange {
            offset: match_offset,
            len,
        });
    }

    let mut start = match_offset;
    if let Some(CharSource::Inferred { item }) = layout.source(match_offset) {
        tracing::debug!(
            page_number,
            match_offset,
            item,
            "match starts on an inferred space; highlighting from the start of the next item"
        );
        start += 1;
    }

    let end = start.saturating_add(match_length).min(len);
    let mut spans: Vec<ItemSpan> = Vec::new();
    for source in &layout.sources()[start.min(end)..end] {
        let CharSource::Item { item, offset } = *source else {
            continue;
        };
        match spans.last_mut() {
            Some(span) if span.item == item => span.last = offset,
            _ => spans.push(ItemSpan {
                item,
                first: offset,
                last: offset,
            }),
        }
    }
    if spans.is_empty() {
        return Err(ResolveError::NoItemText {
            offset: match_offset,
        });
    }

    let rects: Vec<HighlightRect> = spans
        .iter()
        .filter_map(|span| {
            let item = layout.item(span.item)?;
            span_rect(item, span, page_number, page_height)
        })
        .collect();

    Ok(merge_rects(&rects, options.merge_threshold))
}

/// Rectangle covering chars `first..=last` of `item`, flipped to top-down
/// coordinates. `None` for items without a visible box.
fn span_rect(
    item: &PositionedTextItem,
    span: &ItemSpan,
    page_number: usize,
    page_height: f64,
) -> Option<HighlightRect> {
    if item.width() <= 0.0 || item.height() <= 0.0 {
        return None;
    }

    let char_width = item.char_width();
    let left = item.x() + span.first as f64 * char_width;
    let width = (span.last - span.first + 1) as f64 * char_width;
    let top = page_height - (item.y() + item.height());

    Some(HighlightRect::new(page_number, left, top, width, item.height()))
}

/// Resolve a normalized-text match to highlight rectangles.
///
/// Best effort: when the match cannot be located (an offset from a different
/// normalization, or a zero-length match) a warning is logged and no
/// rectangles are returned. See [`try_resolve_rects`].
pub fn resolve_rects(
    items: &[PositionedTextItem],
    page_number: usize,
    page_height: f64,
    match_offset: usize,
    match_length: usize,
    options: &ResolveOptions,
) -> Vec<HighlightRect> {
    try_resolve_rects(
        items,
        page_number,
        page_height,
        match_offset,
        match_length,
        options,
    )
    .unwrap_or_else(|err| {
        tracing::warn!(
            page_number,
            match_offset,
            match_length,
            %err,
            "could not resolve match to highlight rects"
        );
        Vec::new()
    })
}

/// Highlight rectangles for a search result on its page.
///
/// Highlights the result's `search_text` (or its snippet, when absent) at its
/// `match_index`.
pub fn resolve_result(
    items: &[PositionedTextItem],
    page_height: f64,
    result: &SearchResult,
    options: &ResolveOptions,
) -> Vec<HighlightRect> {
    resolve_rects(
        items,
        result.page_number,
        page_height,
        result.match_index,
        result.highlight_len(),
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::page::NormalizedPage;
    use crate::search::{SearchOptions, search};

    fn item(text: &str, x: f64, y: f64, width: f64, height: f64) -> PositionedTextItem {
        PositionedTextItem::new(text, [1.0, 0.0, 0.0, 1.0, x, y], width, height).unwrap()
    }

    fn resolve(items: &[PositionedTextItem], offset: usize, len: usize) -> Vec<HighlightRect> {
        resolve_rects(items, 1, 200.0, offset, len, &ResolveOptions::default())
    }

    #[test]
    fn test_single_item_full_match() {
        let items = vec![item("hello", 0.0, 100.0, 50.0, 10.0)];
        let rects = resolve(&items, 0, 5);
        assert_eq!(rects, vec![HighlightRect::new(1, 0.0, 90.0, 50.0, 10.0)]);
    }

    #[test]
    fn test_y_flip_applied_once() {
        // Baseline at y=700 on a 792-high page: top = 792 - (700 + 12) = 80
        let items = vec![item("flip", 72.0, 700.0, 40.0, 12.0)];
        let rects = resolve_rects(&items, 3, 792.0, 0, 4, &ResolveOptions::default());
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].top, 80.0);
        assert_eq!(rects[0].left, 72.0);
        assert_eq!(rects[0].page_number, 3);
    }

    #[test]
    fn test_partial_match_within_item() {
        let items = vec![item("hello", 0.0, 100.0, 50.0, 10.0)];
        let rects = resolve(&items, 1, 3);
        assert_eq!(rects, vec![HighlightRect::new(1, 10.0, 90.0, 30.0, 10.0)]);
    }

    #[test]
    fn test_match_across_inferred_space() {
        // "Hello World" with the space inferred from the gap
        let items = vec![
            item("Hello", 0.0, 100.0, 50.0, 10.0),
            item("World", 70.0, 100.0, 50.0, 10.0),
        ];
        assert_eq!(
            normalize(&items, &NormalizeOptions::default()),
            "Hello World"
        );

        // "lo Wo": chars 3..5 of Hello and 0..2 of World; gap 20 > threshold 5
        let rects = resolve(&items, 3, 5);
        assert_eq!(
            rects,
            vec![
                HighlightRect::new(1, 30.0, 90.0, 20.0, 10.0),
                HighlightRect::new(1, 70.0, 90.0, 20.0, 10.0),
            ]
        );

        // "World" starts right after the inferred space
        let rects = resolve(&items, 6, 5);
        assert_eq!(rects, vec![HighlightRect::new(1, 70.0, 90.0, 50.0, 10.0)]);
    }

    #[test]
    fn test_adjacent_fragments_merge() {
        let items = vec![
            item("Hel", 0.0, 100.0, 30.0, 10.0),
            item("lo", 30.0, 100.0, 20.0, 10.0),
        ];
        let rects = resolve(&items, 0, 5);
        assert_eq!(rects, vec![HighlightRect::new(1, 0.0, 90.0, 50.0, 10.0)]);
    }

    #[test]
    fn test_match_across_lines() {
        let items = vec![
            item("first", 0.0, 100.0, 50.0, 10.0),
            item("second", 0.0, 85.0, 60.0, 10.0),
        ];
        // "st se"
        let rects = resolve(&items, 3, 5);
        assert_eq!(
            rects,
            vec![
                HighlightRect::new(1, 30.0, 90.0, 20.0, 10.0),
                HighlightRect::new(1, 0.0, 105.0, 20.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_match_starting_on_inferred_space() {
        let items = vec![
            item("ab", 0.0, 100.0, 20.0, 10.0),
            item("cd", 50.0, 100.0, 20.0, 10.0),
        ];
        // offset 2 is the inferred space; the full length is taken from "cd"
        let rects = resolve(&items, 2, 2);
        assert_eq!(rects, vec![HighlightRect::new(1, 50.0, 90.0, 20.0, 10.0)]);
    }

    #[test]
    fn test_inferred_space_start_keeps_match_length() {
        let items = vec![
            item("ab", 0.0, 100.0, 20.0, 10.0),
            item("cdef", 50.0, 100.0, 40.0, 10.0),
        ];
        let rects = resolve(&items, 2, 3);
        assert_eq!(rects, vec![HighlightRect::new(1, 50.0, 90.0, 30.0, 10.0)]);
    }

    #[test]
    fn test_collapsed_whitespace_inside_item() {
        let items = vec![item("a  b", 0.0, 100.0, 40.0, 10.0)];
        // normalized "a b"; "b" is raw char 3
        let rects = resolve(&items, 2, 1);
        assert_eq!(rects, vec![HighlightRect::new(1, 30.0, 90.0, 10.0, 10.0)]);
    }

    #[test]
    fn test_match_length_clamped_to_text_end() {
        let items = vec![item("hello", 0.0, 100.0, 50.0, 10.0)];
        let rects = resolve(&items, 3, 50);
        assert_eq!(rects, vec![HighlightRect::new(1, 30.0, 90.0, 20.0, 10.0)]);
    }

    #[test]
    fn test_unresolvable_offset_is_empty() {
        let items = vec![item("hello", 0.0, 100.0, 50.0, 10.0)];
        assert!(resolve(&items, 5, 1).is_empty());
        assert!(resolve(&[], 0, 1).is_empty());
        assert_eq!(
            try_resolve_rects(&items, 1, 200.0, 9, 1, &ResolveOptions::default()),
            Err(ResolveError::OffsetOutOfRange { offset: 9, len: 5 })
        );
    }

    #[test]
    fn test_zero_length_is_empty() {
        let items = vec![item("hello", 0.0, 100.0, 50.0, 10.0)];
        assert!(resolve(&items, 0, 0).is_empty());
        assert_eq!(
            try_resolve_rects(&items, 1, 200.0, 0, 0, &ResolveOptions::default()),
            Err(ResolveError::EmptyMatch)
        );
    }

    #[test]
    fn test_zero_width_item_contributes_nothing() {
        let items = vec![item("hidden", 0.0, 100.0, 0.0, 10.0)];
        assert!(resolve(&items, 0, 6).is_empty());
    }

    #[test]
    fn test_items_out_of_reading_order() {
        let items = vec![
            item("second", 0.0, 85.0, 60.0, 10.0),
            item("first", 0.0, 100.0, 50.0, 10.0),
        ];
        let rects = resolve(&items, 6, 6);
        assert_eq!(rects, vec![HighlightRect::new(1, 0.0, 105.0, 60.0, 10.0)]);
    }

    #[test]
    fn test_resolve_search_result() {
        let items = vec![
            item("Results:", 0.0, 700.0, 80.0, 12.0),
            item("C-10,", 100.0, 700.0, 50.0, 12.0),
            item("D-12", 170.0, 700.0, 40.0, 12.0),
        ];
        let text = normalize(&items, &NormalizeOptions::default());
        assert_eq!(text, "Results: C-10, D-12");

        let pages = vec![NormalizedPage::new(1, text)];
        let results = search(&pages, "C-10", &SearchOptions::default());
        assert_eq!(results.exact_matches.len(), 1);

        let rects = resolve_result(
            &items,
            792.0,
            &results.exact_matches[0],
            &ResolveOptions::default(),
        );
        assert_eq!(rects, vec![HighlightRect::new(1, 100.0, 80.0, 40.0, 12.0)]);
    }
}
