//! Error types for lector-core.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`TextItemError`] describes
//! why a raw text item was rejected at construction time, and [`ResolveError`]
//! why a normalized-text match could not be mapped back onto page geometry.
//!
//! Neither is fatal to the pipeline: invalid items are dropped and unresolvable
//! matches produce no highlight.

use thiserror::Error;

/// Reason a raw text item failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextItemError {
    /// The item carries no text at all.
    #[error("text item has no text")]
    MissingText,

    /// The item text is empty or whitespace-only.
    #[error("text item is blank")]
    BlankText,

    /// The transform does not have exactly six components.
    #[error("transform must have 6 components, got {0}")]
    TransformArity(usize),

    /// A transform component, width, or height is NaN or infinite.
    #[error("non-finite {0}")]
    NonFinite(&'static str),

    /// Width or height is negative.
    #[error("negative {0}")]
    NegativeExtent(&'static str),
}

/// Reason a match could not be resolved to highlight rectangles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The match has zero length.
    #[error("match length is zero")]
    EmptyMatch,

    /// The match offset lies beyond the page's normalized text.
    #[error("offset {offset} is outside normalized text of {len} chars")]
    OffsetOutOfRange {
        /// Requested normalized offset.
        offset: usize,
        /// Length of the normalized text in chars.
        len: usize,
    },

    /// The match covers no item text once a leading inferred space is skipped.
    #[error("match at offset {offset} covers no item text")]
    NoItemText {
        /// Requested normalized offset.
        offset: usize,
    },
}
