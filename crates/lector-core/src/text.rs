use crate::error::TextItemError;

/// One fragment of text as emitted by a rendering engine for a page.
///
/// Instances are only created through [`PositionedTextItem::new`] or
/// [`TryFrom<RawTextItem>`], which reject blank text, malformed transforms and
/// non-finite geometry. Everything downstream can rely on those invariants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawTextItem", into = "RawTextItem")
)]
pub struct PositionedTextItem {
    text: String,
    transform: [f64; 6],
    width: f64,
    height: f64,
    char_count: usize,
}

impl PositionedTextItem {
    /// Validate and construct an item.
    ///
    /// `transform` is the affine matrix `[a, b, c, d, e, f]`; `e, f` is the
    /// baseline origin in page space with the y axis pointing up.
    pub fn new(
        text: impl Into<String>,
        transform: [f64; 6],
        width: f64,
        height: f64,
    ) -> Result<Self, TextItemError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TextItemError::BlankText);
        }
        if transform.iter().any(|v| !v.is_finite()) {
            return Err(TextItemError::NonFinite("transform"));
        }
        if !width.is_finite() {
            return Err(TextItemError::NonFinite("width"));
        }
        if !height.is_finite() {
            return Err(TextItemError::NonFinite("height"));
        }
        if width < 0.0 {
            return Err(TextItemError::NegativeExtent("width"));
        }
        if height < 0.0 {
            return Err(TextItemError::NegativeExtent("height"));
        }
        let char_count = text.chars().count();
        Ok(Self {
            text,
            transform,
            width,
            height,
            char_count,
        })
    }

    /// Same geometry with different text, re-validated.
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self, TextItemError> {
        Self::new(text, self.transform, self.width, self.height)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn transform(&self) -> &[f64; 6] {
        &self.transform
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of chars (Unicode scalar values) in the text.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Baseline origin x (`transform[4]`).
    pub fn x(&self) -> f64 {
        self.transform[4]
    }

    /// Baseline origin y (`transform[5]`), measured from the page bottom.
    pub fn y(&self) -> f64 {
        self.transform[5]
    }

    /// Right edge of the item box.
    pub fn right(&self) -> f64 {
        self.x() + self.width
    }

    /// Average advance of one char, assuming uniform glyph widths.
    pub fn char_width(&self) -> f64 {
        self.width / self.char_count as f64
    }

    pub fn ends_with_hyphen(&self) -> bool {
        self.text.ends_with('-')
    }
}

/// A text item exactly as a rendering engine hands it over, before validation.
///
/// Marked-content entries and other non-text items typically arrive with no
/// text; malformed ones with a short transform. Convert with
/// [`collect_items`] or `PositionedTextItem::try_from`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawTextItem {
    #[cfg_attr(feature = "serde", serde(default, alias = "str"))]
    pub text: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transform: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: f64,
}

impl TryFrom<RawTextItem> for PositionedTextItem {
    type Error = TextItemError;

    fn try_from(raw: RawTextItem) -> Result<Self, Self::Error> {
        let text = raw.text.ok_or(TextItemError::MissingText)?;
        let transform: [f64; 6] = raw
            .transform
            .as_slice()
            .try_into()
            .map_err(|_| TextItemError::TransformArity(raw.transform.len()))?;
        PositionedTextItem::new(text, transform, raw.width, raw.height)
    }
}

impl From<PositionedTextItem> for RawTextItem {
    fn from(item: PositionedTextItem) -> Self {
        RawTextItem {
            text: Some(item.text),
            transform: item.transform.to_vec(),
            width: item.width,
            height: item.height,
        }
    }
}

/// Validate a page's raw items, dropping every item that fails validation.
///
/// Relative order of the surviving items is preserved.
pub fn collect_items(raw: impl IntoIterator<Item = RawTextItem>) -> Vec<PositionedTextItem> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match PositionedTextItem::try_from(raw) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::debug!(index, %err, "dropping text item");
                None
            }
        })
        .collect()
}

/// Sort items into reading order: top-to-bottom, then left-to-right.
///
/// Items whose baselines lie within `y_tolerance` of the first (highest) item
/// of a line are treated as one line and ordered by x. Both passes are stable,
/// so items at identical positions keep their input order.
pub fn reading_order(items: &[PositionedTextItem], y_tolerance: f64) -> Vec<&PositionedTextItem> {
    reading_order_indices(items, y_tolerance)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}

/// Indices of `items` in reading order. See [`reading_order`].
pub(crate) fn reading_order_indices(items: &[PositionedTextItem], y_tolerance: f64) -> Vec<usize> {
    let y_tolerance = y_tolerance.max(0.0);
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].y().total_cmp(&items[a].y()));

    let mut start = 0;
    while start < order.len() {
        let line_y = items[order[start]].y();
        let end = order[start..]
            .iter()
            .position(|&index| line_y - items[index].y() > y_tolerance)
            .map_or(order.len(), |offset| start + offset);
        order[start..end].sort_by(|&a, &b| items[a].x().total_cmp(&items[b].x()));
        start = end;
    }

    order
}
