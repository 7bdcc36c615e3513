//! lector: Search rendered document text and highlight what was found.
//!
//! This is the public API facade crate. It re-exports the types and
//! algorithms from lector-core and ties them together in [`Document`], a
//! per-document text index that answers queries and resolves clicked results
//! to highlight rectangles on demand.
//!
//! # Architecture
//!
//! - **lector-core**: Renderer-independent data types and algorithms
//! - **lector** (this crate): Public API that ties everything together
//!
//! # Example
//!
//! ```
//! use lector::{Document, LectorOptions, PageContent, PositionedTextItem};
//!
//! let item = PositionedTextItem::new("Hello world", [1.0, 0.0, 0.0, 1.0, 72.0, 700.0], 110.0, 12.0)
//!     .unwrap();
//! let doc = Document::new(vec![PageContent::new(1, 612.0, 792.0, vec![item])], LectorOptions::default());
//!
//! let results = doc.search("world");
//! let first = &results.exact_matches[0];
//! assert_eq!(first.match_index, 6);
//! assert_eq!(doc.highlights(first).len(), 1);
//! ```

mod document;
mod options;

pub use document::Document;
pub use options::LectorOptions;

pub use lector_core;
pub use lector_core::{
    ClientRect, HighlightRect, NormalizeOptions, NormalizedPage, PageContent, PositionedTextItem,
    RawTextItem, RectUnit, ResolveError, ResolveOptions, SearchOptions, SearchResult,
    SearchResults, SelectionFragment, SelectionOptions, SelectionPadding, TextItemError,
    UnicodeNorm,
};
