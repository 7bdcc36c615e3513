//! Unicode normalization of text item content.
//!
//! Rendering engines report text the way the document stores it: a ligature
//! glyph may arrive as `U+FB01`, an accented letter as base plus combining
//! mark. Folding item text to one form lets a typed query match either. The
//! form is part of [`NormalizeOptions`](crate::NormalizeOptions), and the
//! resolver rebuilds the layout through the same [`normalize_items`], so a
//! match offset taken from normalized page text lands on the same item chars.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::text::PositionedTextItem;

/// Normalization form applied to item text before page layout.
///
/// Changing the form changes normalized offsets: a page indexed with one form
/// must be resolved with the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// Item text is used as reported.
    #[default]
    None,
    /// Composed form; merges base letters with combining marks.
    Nfc,
    /// Decomposed form.
    Nfd,
    /// Compatibility composed form; also expands ligatures and width variants.
    Nfkc,
    /// Compatibility decomposed form.
    Nfkd,
}

impl UnicodeNorm {
    /// `text` in this form. Borrows when the form is [`UnicodeNorm::None`].
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            UnicodeNorm::None => Cow::Borrowed(text),
            UnicodeNorm::Nfc => Cow::Owned(text.nfc().collect()),
            UnicodeNorm::Nfd => Cow::Owned(text.nfd().collect()),
            UnicodeNorm::Nfkc => Cow::Owned(text.nfkc().collect()),
            UnicodeNorm::Nfkd => Cow::Owned(text.nfkd().collect()),
        }
    }
}

/// Items with their text in form `norm`, geometry untouched.
///
/// Borrows the input when the form is [`UnicodeNorm::None`]. An item whose
/// text becomes blank is dropped.
pub fn normalize_items<'a>(
    items: &'a [PositionedTextItem],
    norm: UnicodeNorm,
) -> Cow<'a, [PositionedTextItem]> {
    if norm == UnicodeNorm::None {
        return Cow::Borrowed(items);
    }

    Cow::Owned(
        items
            .iter()
            .filter_map(|item| item.with_text(norm.apply(item.text())).ok())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> PositionedTextItem {
        PositionedTextItem::new(text, [1.0, 0.0, 0.0, 1.0, 10.0, 100.0], 30.0, 10.0).unwrap()
    }

    #[test]
    fn test_none_borrows() {
        let items = vec![item("caf\u{0065}\u{0301}")];
        let out = normalize_items(&items, UnicodeNorm::None);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out[0].text(), "caf\u{0065}\u{0301}");
    }

    #[test]
    fn test_nfc_composes() {
        let items = vec![item("caf\u{0065}\u{0301}")];
        let out = normalize_items(&items, UnicodeNorm::Nfc);
        assert_eq!(out[0].text(), "caf\u{00E9}");
        assert_eq!(out[0].char_count(), 4);
        assert_eq!(out[0].x(), 10.0);
    }

    #[test]
    fn test_nfkc_expands_ligature() {
        let items = vec![item("\u{FB01}nd")];
        let out = normalize_items(&items, UnicodeNorm::Nfkc);
        assert_eq!(out[0].text(), "find");
    }

    #[test]
    fn test_nfd_decomposes() {
        assert_eq!(UnicodeNorm::Nfd.apply("\u{00E9}"), "e\u{0301}");
        assert!(matches!(UnicodeNorm::None.apply("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_ligature_search_and_resolve_agree() {
        use crate::geometry::HighlightRect;
        use crate::normalize::{NormalizeOptions, normalize};
        use crate::resolve::{ResolveOptions, resolve_rects};

        // 3 reported chars over 30 units; 4 chars after NFKC
        let items = vec![item("\u{FB01}nd")];
        let normalize_opts = NormalizeOptions {
            unicode_norm: UnicodeNorm::Nfkc,
            ..Default::default()
        };
        assert_eq!(normalize(&items, &normalize_opts), "find");

        let resolve_opts = ResolveOptions {
            normalize: normalize_opts,
            ..Default::default()
        };
        let rects = resolve_rects(&items, 1, 200.0, 1, 3, &resolve_opts);
        assert_eq!(rects, vec![HighlightRect::new(1, 17.5, 90.0, 22.5, 10.0)]);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(UnicodeNorm::default(), UnicodeNorm::None);
    }
}
