//! Highlight rectangle merging.
//!
//! Collapses fragment rectangles (per item, per selection range) into the
//! fewest rectangles that cover them, line by line.

use crate::geometry::HighlightRect;

/// Default horizontal gap tolerance when merging the fragments of one search match.
pub const DEFAULT_MATCH_MERGE_THRESHOLD: f64 = 5.0;

/// Default horizontal gap tolerance when consolidating a text selection.
///
/// Larger than the match threshold: a selection spans whole words and has to
/// be stitched across inter-word gaps.
pub const DEFAULT_SELECTION_MERGE_THRESHOLD: f64 = 20.0;

/// Returns whether two rectangles should be merged.
///
/// Two rectangles merge if:
/// 1. They are on the same page
/// 2. Their vertical extents overlap (touching counts)
/// 3. One's trailing edge is closer than `threshold` to the other's leading
///    edge, or their horizontal spans overlap
pub fn should_merge(a: &HighlightRect, b: &HighlightRect, threshold: f64) -> bool {
    if a.page_number != b.page_number || !a.overlaps_vertically(b) {
        return false;
    }

    (a.right() - b.left).abs() < threshold
        || (b.right() - a.left).abs() < threshold
        || a.overlaps_horizontally(b)
}

/// Merge adjacent or overlapping rectangles in a single greedy pass.
///
/// Rectangles are ordered by page, then by `top`; an accumulator absorbs each
/// following rectangle that [`should_merge`] with it (taking their union), and
/// is emitted as soon as one does not. Empty or single-rectangle input is
/// returned unchanged.
pub fn merge_rects(rects: &[HighlightRect], threshold: f64) -> Vec<HighlightRect> {
    if rects.len() <= 1 {
        return rects.to_vec();
    }

    let mut sorted = rects.to_vec();
    sorted.sort_by(|a, b| {
        a.page_number
            .cmp(&b.page_number)
            .then(a.top.total_cmp(&b.top))
    });

    let mut merged = Vec::with_capacity(sorted.len());
    let mut current = sorted[0];

    for next in &sorted[1..] {
        if should_merge(&current, next, threshold) {
            current = current.union(next);
        } else {
            merged.push(current);
            current = *next;
        }
    }
    merged.push(current);

    merged
}

/// Merge the fragments of a single search match.
pub fn merge_match_rects(rects: &[HighlightRect]) -> Vec<HighlightRect> {
    merge_rects(rects, DEFAULT_MATCH_MERGE_THRESHOLD)
}

/// Merge the rectangles of a live text selection.
pub fn merge_selection_rects(rects: &[HighlightRect]) -> Vec<HighlightRect> {
    merge_rects(rects, DEFAULT_SELECTION_MERGE_THRESHOLD)
}
