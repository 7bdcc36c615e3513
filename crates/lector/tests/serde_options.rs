//! Loading document configuration from JSON.

#![cfg(feature = "serde")]

use lector::{LectorOptions, UnicodeNorm};

#[test]
fn partial_config_fills_defaults() {
    let opts: LectorOptions = serde_json::from_str(
        r#"{
            "normalize": { "unicode_norm": "Nfkc" },
            "search": { "threshold": 0.8, "limit": 20 },
            "match_merge_threshold": 3.0
        }"#,
    )
    .unwrap();

    assert_eq!(opts.normalize.unicode_norm, UnicodeNorm::Nfkc);
    assert_eq!(opts.normalize.y_tolerance, 1.0);
    assert_eq!(opts.search.threshold, 0.8);
    assert_eq!(opts.search.limit, 20);
    assert_eq!(opts.search.context_size, 100);
    assert_eq!(opts.selection, Default::default());
    assert_eq!(opts.resolve_options().merge_threshold, 3.0);
}

#[test]
fn empty_config_is_default() {
    let opts: LectorOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, LectorOptions::default());
}

#[test]
fn options_roundtrip() {
    let opts = LectorOptions::default();
    let json = serde_json::to_string(&opts).unwrap();
    let restored: LectorOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(opts, restored);
}
