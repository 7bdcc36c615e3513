//! Text selection consolidation.
//!
//! A host's selection API reports one client (screen-space) rectangle per
//! selected line fragment, already scaled by the current zoom. This module
//! brings those fragments back into page space and consolidates them per page
//! into a few padded highlight rectangles.

use std::collections::BTreeMap;

use crate::geometry::HighlightRect;
use crate::merge::{DEFAULT_SELECTION_MERGE_THRESHOLD, merge_rects};

/// An axis-aligned rectangle in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert to page space, relative to the page's text layer and unscaled
    /// by `zoom`.
    pub fn to_page_rect(&self, page_number: usize, layer: &ClientRect, zoom: f64) -> HighlightRect {
        HighlightRect::new(
            page_number,
            (self.left - layer.left) / zoom,
            (self.top - layer.top) / zoom,
            self.width / zoom,
            self.height / zoom,
        )
    }
}

/// One selected fragment, attributed to the text layer of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionFragment {
    /// Page number (1-indexed) of the text layer under the fragment.
    pub page_number: usize,
    /// The fragment's client rectangle.
    pub rect: ClientRect,
    /// The page text layer's client rectangle.
    pub layer: ClientRect,
}

/// Padding added around each consolidated selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionPadding {
    /// Added on the left and on the right. Default: `2.0`.
    pub horizontal: f64,
    /// Added above. Default: `2.0`.
    pub top: f64,
    /// Added below. Default: `0.0`.
    pub bottom: f64,
}

impl Default for SelectionPadding {
    fn default() -> Self {
        Self {
            horizontal: 2.0,
            top: 2.0,
            bottom: 0.0,
        }
    }
}

/// Options for selection consolidation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionOptions {
    /// Horizontal gap tolerance for merging fragments. Default: `20.0`.
    pub merge_threshold: f64,
    /// Fragments no wider or no taller than this (in client units) are
    /// ignored. Default: `2.0`.
    pub min_fragment_size: f64,
    pub padding: SelectionPadding,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            merge_threshold: DEFAULT_SELECTION_MERGE_THRESHOLD,
            min_fragment_size: 2.0,
            padding: SelectionPadding::default(),
        }
    }
}

/// Merge one page's selection rectangles and pad the result.
pub fn consolidate_selection(rects: &[HighlightRect], options: &SelectionOptions) -> Vec<HighlightRect> {
    let pad = options.padding;
    merge_rects(rects, options.merge_threshold)
        .iter()
        .map(|r| r.expand(pad.horizontal, pad.top, pad.horizontal, pad.bottom))
        .collect()
}

/// Page-space highlight rectangles for a text selection.
///
/// Tiny fragments are dropped, the rest converted to page space and
/// consolidated per page. The result is ordered by page number.
///
/// # Panics
///
/// Panics if `zoom` is not a positive finite number.
pub fn selection_highlights(
    fragments: &[SelectionFragment],
    zoom: f64,
    options: &SelectionOptions,
) -> Vec<HighlightRect> {
    assert!(
        zoom.is_finite() && zoom > 0.0,
        "zoom must be positive and finite, got {zoom}"
    );

    let mut by_page: BTreeMap<usize, Vec<HighlightRect>> = BTreeMap::new();
    for fragment in fragments {
        let rect = &fragment.rect;
        if rect.width <= options.min_fragment_size || rect.height <= options.min_fragment_size {
            continue;
        }
        by_page
            .entry(fragment.page_number)
            .or_default()
            .push(rect.to_page_rect(fragment.page_number, &fragment.layer, zoom));
    }

    by_page
        .values()
        .flat_map(|rects| consolidate_selection(rects, options))
        .collect()
}
