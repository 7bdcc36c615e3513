//! lector-core: Renderer-independent text reconciliation and search.
//!
//! This crate provides the data types (positioned text items, normalized
//! pages, search results, highlight rectangles) and the algorithms that connect
//! them: page text normalization, exact and fuzzy search, match-to-geometry
//! resolution, and rectangle merging. It knows nothing about any rendering
//! engine or UI toolkit; every function is pure and works on plain values.
//!
//! # Pipeline
//!
//! ```text
//! items ──normalize──▶ page text ──search──▶ results
//! items + result ──resolve──▶ rects ──merge──▶ highlights
//! ```

pub mod error;
pub mod geometry;
pub mod merge;
pub mod normalize;
pub mod page;
pub mod resolve;
pub mod search;
pub mod selection;
pub mod text;
pub mod unicode_norm;

pub use error::{ResolveError, TextItemError};
pub use geometry::{HighlightRect, RectUnit};
pub use merge::{
    DEFAULT_MATCH_MERGE_THRESHOLD, DEFAULT_SELECTION_MERGE_THRESHOLD, merge_match_rects,
    merge_rects, merge_selection_rects, should_merge,
};
pub use normalize::{CharSource, NormalizeOptions, PageLayout, normalize};
pub use page::{NormalizedPage, PageContent};
pub use resolve::{ResolveOptions, resolve_rects, resolve_result, try_resolve_rects};
pub use search::{
    SearchEngine, SearchOptions, SearchResult, SearchResults, edit_distance, search, search_page,
};
pub use selection::{
    ClientRect, SelectionFragment, SelectionOptions, SelectionPadding, consolidate_selection,
    selection_highlights,
};
pub use text::{PositionedTextItem, RawTextItem, collect_items, reading_order};
pub use unicode_norm::UnicodeNorm;
