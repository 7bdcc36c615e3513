use lector_core::{
    HighlightRect, NormalizedPage, PageContent, ResolveOptions, SearchEngine, SearchOptions,
    SearchResult, SearchResults, SelectionFragment, selection_highlights,
};

use crate::options::LectorOptions;

/// A searchable document.
///
/// Built once from the text items of every page. Construction normalizes all
/// pages into the text index; rectangles are only computed when a result is
/// asked to be highlighted.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<PageContent>,
    engine: SearchEngine,
    options: LectorOptions,
    resolve: ResolveOptions,
}

impl Document {
    /// Index `pages`. Pages are kept in the given order.
    pub fn new(pages: Vec<PageContent>, options: LectorOptions) -> Self {
        let normalized: Vec<NormalizedPage> = pages
            .iter()
            .map(|page| page.normalize(&options.normalize))
            .collect();
        Self::from_parts(pages, normalized, options)
    }

    /// Index `pages`, normalizing them concurrently with rayon.
    ///
    /// The result is identical to [`Document::new`].
    #[cfg(feature = "parallel")]
    pub fn new_parallel(pages: Vec<PageContent>, options: LectorOptions) -> Self {
        use rayon::prelude::*;

        let normalized: Vec<NormalizedPage> = pages
            .par_iter()
            .map(|page| page.normalize(&options.normalize))
            .collect();
        Self::from_parts(pages, normalized, options)
    }

    fn from_parts(pages: Vec<PageContent>, normalized: Vec<NormalizedPage>, options: LectorOptions) -> Self {
        tracing::debug!(
            page_count = pages.len(),
            text_bytes = normalized.iter().map(|p| p.text.len()).sum::<usize>(),
            "indexed document"
        );
        let resolve = options.resolve_options();
        Self {
            pages,
            engine: SearchEngine::new(normalized),
            options,
            resolve,
        }
    }

    pub fn options(&self) -> &LectorOptions {
        &self.options
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page content by 1-based page number.
    pub fn page(&self, page_number: usize) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// The text index: one normalized page per page, in document order.
    pub fn normalized_pages(&self) -> &[NormalizedPage] {
        self.engine.pages()
    }

    /// Normalized text of a page by 1-based page number.
    pub fn normalized_page(&self, page_number: usize) -> Option<&NormalizedPage> {
        self.engine.page(page_number)
    }

    /// Search with the document's default search options.
    pub fn search(&self, query: &str) -> SearchResults {
        self.engine.search(query, &self.options.search)
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> SearchResults {
        self.engine.search(query, options)
    }

    /// Highlight rectangles for a search result.
    ///
    /// Returns nothing for a result whose page is not in this document.
    pub fn highlights(&self, result: &SearchResult) -> Vec<HighlightRect> {
        match self.page(result.page_number) {
            Some(page) => page.resolve_result(result, &self.resolve),
            None => {
                tracing::warn!(page_number = result.page_number, "search result for unknown page");
                Vec::new()
            }
        }
    }

    /// Highlight rectangles for `length` normalized chars at `offset` on a page.
    pub fn highlight_range(&self, page_number: usize, offset: usize, length: usize) -> Vec<HighlightRect> {
        match self.page(page_number) {
            Some(page) => page.resolve_rects(offset, length, &self.resolve),
            None => {
                tracing::warn!(page_number, "highlight range on unknown page");
                Vec::new()
            }
        }
    }

    /// Consolidated highlight rectangles for a live text selection.
    ///
    /// # Panics
    ///
    /// Panics if `zoom` is not a positive finite number.
    pub fn selection_highlights(&self, fragments: &[SelectionFragment], zoom: f64) -> Vec<HighlightRect> {
        selection_highlights(fragments, zoom, &self.options.selection)
    }
}
