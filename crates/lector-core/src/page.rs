use crate::geometry::HighlightRect;
use crate::normalize::{NormalizeOptions, normalize};
use crate::resolve::{ResolveOptions, resolve_rects, resolve_result};
use crate::search::SearchResult;
use crate::text::{PositionedTextItem, RawTextItem, collect_items};

/// The searchable text of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedPage {
    /// Page number (1-indexed).
    pub page_number: usize,
    /// Normalized text; search offsets index its chars.
    pub text: String,
}

impl NormalizedPage {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Everything the core needs to know about one page: its validated text items
/// and its size at scale 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageContent {
    /// Page number (1-indexed).
    pub page_number: usize,
    /// Unscaled page width.
    pub width: f64,
    /// Unscaled page height; used to flip baseline coordinates.
    pub height: f64,
    pub items: Vec<PositionedTextItem>,
}

impl PageContent {
    pub fn new(page_number: usize, width: f64, height: f64, items: Vec<PositionedTextItem>) -> Self {
        Self {
            page_number,
            width,
            height,
            items,
        }
    }

    /// Build a page from unvalidated items, dropping the invalid ones.
    pub fn from_raw(
        page_number: usize,
        width: f64,
        height: f64,
        raw: impl IntoIterator<Item = RawTextItem>,
    ) -> Self {
        Self::new(page_number, width, height, collect_items(raw))
    }

    pub fn normalize(&self, options: &NormalizeOptions) -> NormalizedPage {
        NormalizedPage::new(self.page_number, normalize(&self.items, options))
    }

    /// Highlight rectangles for `match_length` normalized chars at `match_offset`.
    pub fn resolve_rects(
        &self,
        match_offset: usize,
        match_length: usize,
        options: &ResolveOptions,
    ) -> Vec<HighlightRect> {
        resolve_rects(
            &self.items,
            self.page_number,
            self.height,
            match_offset,
            match_length,
            options,
        )
    }

    /// Highlight rectangles for a search result found on this page.
    pub fn resolve_result(&self, result: &SearchResult, options: &ResolveOptions) -> Vec<HighlightRect> {
        debug_assert_eq!(result.page_number, self.page_number);
        resolve_result(&self.items, self.height, result, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: Option<&str>, transform: Vec<f64>, width: f64) -> RawTextItem {
        RawTextItem {
            text: text.map(str::to_string),
            transform,
            width,
            height: 10.0,
        }
    }

    #[test]
    fn test_from_raw_filters_and_normalizes() {
        let page = PageContent::from_raw(
            2,
            612.0,
            792.0,
            vec![
                raw(Some("Hello"), vec![1.0, 0.0, 0.0, 1.0, 10.0, 700.0], 50.0),
                raw(None, vec![], 0.0),
                raw(Some("World"), vec![1.0, 0.0, 0.0, 1.0, 80.0, 700.0], 50.0),
                raw(Some("bad"), vec![1.0, 0.0], 30.0),
            ],
        );
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.normalize(&NormalizeOptions::default()),
            NormalizedPage::new(2, "Hello World")
        );
    }

    #[test]
    fn test_resolve_uses_page_height_and_number() {
        let page = PageContent::from_raw(
            4,
            612.0,
            792.0,
            vec![raw(Some("Hello"), vec![1.0, 0.0, 0.0, 1.0, 10.0, 700.0], 50.0)],
        );
        let rects = page.resolve_rects(0, 5, &ResolveOptions::default());
        assert_eq!(rects, vec![HighlightRect::new(4, 10.0, 82.0, 50.0, 10.0)]);
    }

    #[test]
    fn test_resolve_result_on_page() {
        let page = PageContent::from_raw(
            1,
            612.0,
            792.0,
            vec![raw(Some("Hello"), vec![1.0, 0.0, 0.0, 1.0, 10.0, 700.0], 50.0)],
        );
        let result = SearchResult {
            page_number: 1,
            text: "llo".to_string(),
            score: 1.0,
            match_index: 2,
            is_exact_match: true,
            search_text: Some("ll".to_string()),
        };
        let rects = page.resolve_result(&result, &ResolveOptions::default());
        assert_eq!(rects, vec![HighlightRect::new(1, 30.0, 82.0, 20.0, 10.0)]);
    }
}
