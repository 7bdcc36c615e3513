/// Unit of a [`HighlightRect`]'s coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RectUnit {
    /// Page-space units at scale 1 (default).
    #[default]
    Pixels,
    /// Percentages of the page width (`left`, `width`) and height (`top`, `height`).
    Percent,
}

/// Axis-aligned highlight rectangle with top-left origin coordinate system.
///
/// Coordinates are measured in page space:
/// - `left`: distance from the left edge of the page
/// - `top`: distance from the top edge of the page
/// - `width`, `height`: extent, never negative
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightRect {
    /// Page number (1-indexed).
    pub page_number: usize,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Coordinate unit.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub unit: RectUnit,
}

impl HighlightRect {
    /// Create a pixel-unit rectangle. Negative extents are clamped to zero.
    pub fn new(page_number: usize, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            page_number,
            top,
            left,
            width: width.max(0.0),
            height: height.max(0.0),
            unit: RectUnit::Pixels,
        }
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Smallest rectangle covering both. Page number and unit come from `self`.
    pub fn union(&self, other: &HighlightRect) -> HighlightRect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        HighlightRect {
            page_number: self.page_number,
            top,
            left,
            width: self.right().max(other.right()) - left,
            height: self.bottom().max(other.bottom()) - top,
            unit: self.unit,
        }
    }

    /// Whether the vertical extents touch or overlap.
    pub fn overlaps_vertically(&self, other: &HighlightRect) -> bool {
        !(self.top > other.bottom() || other.top > self.bottom())
    }

    /// Whether the horizontal spans strictly overlap.
    pub fn overlaps_horizontally(&self, other: &HighlightRect) -> bool {
        self.left < other.right() && other.left < self.right()
    }

    /// Grow the rectangle outwards by the given margins.
    pub fn expand(&self, left: f64, top: f64, right: f64, bottom: f64) -> HighlightRect {
        HighlightRect {
            left: self.left - left,
            top: self.top - top,
            width: (self.width + left + right).max(0.0),
            height: (self.height + top + bottom).max(0.0),
            ..*self
        }
    }

    /// Convert a pixel rectangle to percentages of the given page size.
    ///
    /// Returns the rectangle unchanged if it is already in percent, or if
    /// either page dimension is not positive.
    pub fn to_percent(&self, page_width: f64, page_height: f64) -> HighlightRect {
        if self.unit == RectUnit::Percent || page_width <= 0.0 || page_height <= 0.0 {
            return *self;
        }
        HighlightRect {
            page_number: self.page_number,
            top: self.top / page_height * 100.0,
            left: self.left / page_width * 100.0,
            width: self.width / page_width * 100.0,
            height: self.height / page_height * 100.0,
            unit: RectUnit::Percent,
        }
    }

    /// Convert a percent rectangle back to page-space pixels.
    pub fn to_pixels(&self, page_width: f64, page_height: f64) -> HighlightRect {
        if self.unit == RectUnit::Pixels {
            return *self;
        }
        HighlightRect {
            page_number: self.page_number,
            top: self.top * page_height / 100.0,
            left: self.left * page_width / 100.0,
            width: self.width * page_width / 100.0,
            height: self.height * page_height / 100.0,
            unit: RectUnit::Pixels,
        }
    }
}
