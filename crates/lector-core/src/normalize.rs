//! Page text normalization.
//!
//! Turns a page's positioned text items into the single reading-order string
//! that search runs against, inferring the spaces and line breaks the raw
//! glyph stream leaves implicit. [`PageLayout`] keeps, for every normalized
//! char, the item and raw char it came from, so a match offset can be mapped
//! back onto geometry later without storing anything per page.

use std::borrow::Cow;

use crate::text::{PositionedTextItem, reading_order_indices};
use crate::unicode_norm::{UnicodeNorm, normalize_items};

/// Default tolerance (in page units) for treating two baselines as one line.
pub const DEFAULT_Y_TOLERANCE: f64 = 1.0;

/// Default fraction of the previous item's height that the baseline must drop
/// by for the next item to start a new line.
pub const DEFAULT_LINE_BREAK_FACTOR: f64 = 0.7;

/// Default multiple of the average char width that a same-line gap must
/// exceed to be read as a space.
pub const DEFAULT_SPACE_GAP_FACTOR: f64 = 1.5;

/// Line height assumed for items that report a zero height.
pub const DEFAULT_FALLBACK_LINE_HEIGHT: f64 = 8.0;

/// Options for page text normalization.
///
/// The resolver must be given the same options the normalizer used, otherwise
/// offsets will not line up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizeOptions {
    /// Maximum baseline difference for items to be ordered as one line. Default: `1.0`.
    pub y_tolerance: f64,
    /// New-line threshold as a fraction of the previous item's height. Default: `0.7`.
    pub line_break_factor: f64,
    /// Same-line gap threshold in average char widths. Default: `1.5`.
    pub space_gap_factor: f64,
    /// Height used for the line-break test when an item's height is zero. Default: `8.0`.
    pub fallback_line_height: f64,
    /// Unicode normalization applied to item text before layout. Default: none.
    pub unicode_norm: UnicodeNorm,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            line_break_factor: DEFAULT_LINE_BREAK_FACTOR,
            space_gap_factor: DEFAULT_SPACE_GAP_FACTOR,
            fallback_line_height: DEFAULT_FALLBACK_LINE_HEIGHT,
            unicode_norm: UnicodeNorm::None,
        }
    }
}

/// Where a normalized char came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSource {
    /// A char of an item's text. `item` indexes the layout's reading order,
    /// `offset` is the char index within that item's text.
    Item { item: usize, offset: usize },
    /// A space inferred in front of the item at `item`.
    Inferred { item: usize },
}

impl CharSource {
    /// Reading-order index of the item this char belongs to.
    pub fn item(&self) -> usize {
        match *self {
            CharSource::Item { item, .. } | CharSource::Inferred { item } => item,
        }
    }
}

/// Normalized text of one page together with its char-to-item mapping.
#[derive(Debug, Clone)]
pub struct PageLayout<'a> {
    items: Cow<'a, [PositionedTextItem]>,
    order: Vec<usize>,
    text: String,
    sources: Vec<CharSource>,
}

impl<'a> PageLayout<'a> {
    /// Lay out the given items.
    ///
    /// Items are put into reading order, then walked with the previous item in
    /// hand. A single space is inferred in front of an item when it starts a
    /// new line (unless the previous text ends in a hyphen) or when it sits
    /// clearly apart from the previous item on the same line. Any run of
    /// whitespace, inferred or not, becomes exactly one `' '`, and leading and
    /// trailing whitespace is dropped.
    pub fn build(items: &'a [PositionedTextItem], options: &NormalizeOptions) -> Self {
        let items = normalize_items(items, options.unicode_norm);
        let order = reading_order_indices(&items, options.y_tolerance);

        let mut text = String::new();
        let mut sources = Vec::new();
        let mut pending: Option<CharSource> = None;
        let mut prev: Option<&PositionedTextItem> = None;

        for (pos, &index) in order.iter().enumerate() {
            let item = &items[index];

            if let Some(prev) = prev {
                if pending.is_none() && needs_space(prev, item, options) {
                    pending = Some(CharSource::Inferred { item: pos });
                }
            }

            for (offset, ch) in item.text().chars().enumerate() {
                if ch.is_whitespace() {
                    pending.get_or_insert(CharSource::Item { item: pos, offset });
                    continue;
                }
                if let Some(space) = pending.take() {
                    if !text.is_empty() {
                        text.push(' ');
                        sources.push(space);
                    }
                }
                text.push(ch);
                sources.push(CharSource::Item { item: pos, offset });
            }

            prev = Some(item);
        }

        Self {
            items,
            order,
            text,
            sources,
        }
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Length of the normalized text in chars.
    pub fn char_len(&self) -> usize {
        self.sources.len()
    }

    /// Source of the normalized char at `offset`.
    pub fn source(&self, offset: usize) -> Option<CharSource> {
        self.sources.get(offset).copied()
    }

    /// Sources of all normalized chars, in order.
    pub fn sources(&self) -> &[CharSource] {
        &self.sources
    }

    /// Item at reading-order position `pos`.
    pub fn item(&self, pos: usize) -> Option<&PositionedTextItem> {
        self.order.get(pos).map(|&index| &self.items[index])
    }

    /// Number of items that took part in the layout.
    pub fn item_count(&self) -> usize {
        self.order.len()
    }
}

/// Whether a space has to be inferred between `prev` and `cur`.
fn needs_space(prev: &PositionedTextItem, cur: &PositionedTextItem, options: &NormalizeOptions) -> bool {
    let line_height = if prev.height() > 0.0 {
        prev.height()
    } else {
        options.fallback_line_height
    };

    if prev.y() - cur.y() > line_height * options.line_break_factor {
        return !prev.ends_with_hyphen();
    }

    cur.x() - prev.right() > prev.char_width() * options.space_gap_factor
}

/// Normalize a page's items into its searchable text.
///
/// A page without items normalizes to the empty string.
pub fn normalize(items: &[PositionedTextItem], options: &NormalizeOptions) -> String {
    PageLayout::build(items, options).into_text()
}
