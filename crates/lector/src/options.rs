use lector_core::{
    DEFAULT_MATCH_MERGE_THRESHOLD, NormalizeOptions, ResolveOptions, SearchOptions,
    SelectionOptions,
};

/// All configuration for a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LectorOptions {
    /// How page text is built. Search offsets refer to text built this way.
    pub normalize: NormalizeOptions,
    /// Defaults for [`Document::search`](crate::Document::search).
    pub search: SearchOptions,
    /// Horizontal gap tolerance for merging a match's rectangles. Default: `5.0`.
    pub match_merge_threshold: f64,
    pub selection: SelectionOptions,
}

impl Default for LectorOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            search: SearchOptions::default(),
            match_merge_threshold: DEFAULT_MATCH_MERGE_THRESHOLD,
            selection: SelectionOptions::default(),
        }
    }
}

impl LectorOptions {
    /// Resolver options consistent with this configuration's normalization.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            normalize: self.normalize.clone(),
            merge_threshold: self.match_merge_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lector_core::UnicodeNorm;

    #[test]
    fn test_resolve_options_follow_normalization() {
        let opts = LectorOptions {
            normalize: NormalizeOptions {
                unicode_norm: UnicodeNorm::Nfkc,
                ..Default::default()
            },
            match_merge_threshold: 2.0,
            ..Default::default()
        };
        let resolve = opts.resolve_options();
        assert_eq!(resolve.normalize.unicode_norm, UnicodeNorm::Nfkc);
        assert_eq!(resolve.merge_threshold, 2.0);
    }

    #[test]
    fn test_defaults() {
        let opts = LectorOptions::default();
        assert_eq!(opts.resolve_options(), ResolveOptions::default());
        assert_eq!(opts.search, SearchOptions::default());
    }
}
