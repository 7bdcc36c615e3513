//! Exact and fuzzy (edit-distance) text search over normalized pages.
//!
//! Search works purely on text: results carry a page number and a char offset
//! into that page's normalized text. Turning a result into geometry is left to
//! [`crate::resolve`], and only for the results a caller actually displays.

use crate::page::NormalizedPage;

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Default number of results returned (exact and fuzzy combined).
pub const DEFAULT_LIMIT: usize = 10;

/// Default number of chars captured for a result snippet.
pub const DEFAULT_CONTEXT_SIZE: usize = 100;

/// Slack for floating-point error when deriving the maximum edit distance,
/// so e.g. `5 * (1 - 0.8)` counts as 1 and not 0.999….
const DISTANCE_EPSILON: f64 = 1e-9;

/// Options controlling search behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Minimum similarity `1 - distance / query_len` for a fuzzy match,
    /// in `(0, 1]` (default: `0.7`).
    pub threshold: f64,
    /// Total number of results to return (default: `10`).
    pub limit: usize,
    /// Snippet length in chars, starting at the match (default: `100`).
    pub context_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_LIMIT,
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }
}

impl SearchOptions {
    /// Largest edit distance a fuzzy match may have for a query of `query_len` chars.
    pub fn max_distance(&self, query_len: usize) -> usize {
        (query_len as f64 * (1.0 - self.threshold) + DISTANCE_EPSILON).floor() as usize
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Page number (1-indexed).
    pub page_number: usize,
    /// Snippet of the page text starting at the match.
    pub text: String,
    /// Similarity in `(0, 1]`; `1.0` for exact matches.
    pub score: f64,
    /// Char offset of the match in the page's normalized text.
    pub match_index: usize,
    pub is_exact_match: bool,
    /// The query that produced this hit; its length is what gets highlighted.
    pub search_text: Option<String>,
}

impl SearchResult {
    /// Number of normalized chars to highlight: the query length when known,
    /// otherwise the snippet length.
    pub fn highlight_len(&self) -> usize {
        self.search_text
            .as_deref()
            .unwrap_or(&self.text)
            .chars()
            .count()
    }
}

/// The outcome of one query.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResults {
    pub exact_matches: Vec<SearchResult>,
    pub fuzzy_matches: Vec<SearchResult>,
    /// Whether more results were found than `limit` allowed to return.
    pub has_more_results: bool,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty() && self.fuzzy_matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exact_matches.len() + self.fuzzy_matches.len()
    }

    /// Exact matches followed by fuzzy matches.
    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        self.exact_matches.iter().chain(self.fuzzy_matches.iter())
    }
}

/// Case-fold a string one char at a time.
///
/// Each char maps to exactly one char, so offsets into the folded text are
/// offsets into the original.
fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Case-insensitive Levenshtein distance between two strings, in chars.
///
/// Insertions, deletions and substitutions all cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::generic_levenshtein(&fold(a), &fold(b))
}

/// Search normalized pages for `query`.
///
/// 1. Exact pass: every non-overlapping, case-insensitive occurrence of the
///    query, scanning forward and skipping past each hit.
/// 2. Fuzzy pass: every window of query length whose edit distance `d` from
///    the query satisfies `0 < d <= floor(len * (1 - threshold))`, skipping
///    windows that start inside an exact hit on the same page. After a hit the
///    scan jumps ahead by the query length.
/// 3. Both lists are sorted by score (stably, so document order breaks ties);
///    up to `ceil(limit / 2)` exact matches are kept and fuzzy matches fill
///    the rest of `limit`.
///
/// An empty or whitespace-only query yields empty results.
///
/// # Panics
///
/// Panics if `options.threshold` is not in `(0, 1]`.
pub fn search(pages: &[NormalizedPage], query: &str, options: &SearchOptions) -> SearchResults {
    assert!(
        options.threshold > 0.0 && options.threshold <= 1.0,
        "search threshold must be in (0, 1], got {}",
        options.threshold
    );

    if query.trim().is_empty() {
        return SearchResults::default();
    }

    let needle = fold(query);
    let max_distance = options.max_distance(needle.len());

    let mut exact_matches = Vec::new();
    let mut fuzzy_matches = Vec::new();

    for page in pages {
        let original: Vec<char> = page.text.chars().collect();
        let haystack = fold(&page.text);
        let mut excluded = vec![false; haystack.len()];

        let page_search = PageSearch {
            page_number: page.page_number,
            original: &original,
            haystack: &haystack,
            query,
            needle: &needle,
            context_size: options.context_size,
        };

        let exact = page_search.exact(&mut excluded);
        let fuzzy = page_search.fuzzy(&excluded, max_distance);
        tracing::trace!(
            page = page.page_number,
            exact = exact.len(),
            fuzzy = fuzzy.len(),
            "searched page"
        );

        exact_matches.extend(exact);
        fuzzy_matches.extend(fuzzy);
    }

    exact_matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    fuzzy_matches.sort_by(|a, b| b.score.total_cmp(&a.score));

    let total = exact_matches.len() + fuzzy_matches.len();
    let exact_limit = exact_matches.len().min(options.limit.div_ceil(2));
    let fuzzy_limit = fuzzy_matches.len().min(options.limit - exact_limit);
    exact_matches.truncate(exact_limit);
    fuzzy_matches.truncate(fuzzy_limit);

    SearchResults {
        exact_matches,
        fuzzy_matches,
        has_more_results: total > options.limit,
    }
}

/// Per-page search state.
struct PageSearch<'a> {
    page_number: usize,
    original: &'a [char],
    haystack: &'a [char],
    query: &'a str,
    // `Vec` because strsim iterates its inputs through `&Vec<char>`.
    needle: &'a Vec<char>,
    context_size: usize,
}

impl PageSearch<'_> {
    fn result(&self, match_index: usize, score: f64, is_exact_match: bool) -> SearchResult {
        let end = (match_index + self.context_size).min(self.original.len());
        SearchResult {
            page_number: self.page_number,
            text: self.original[match_index..end].iter().collect(),
            score,
            match_index,
            is_exact_match,
            search_text: Some(self.query.to_string()),
        }
    }

    /// Exact hits; marks every covered offset in `excluded`.
    fn exact(&self, excluded: &mut [bool]) -> Vec<SearchResult> {
        let n = self.needle.len();
        let mut results = Vec::new();
        let mut index = 0;

        while index + n <= self.haystack.len() {
            if self.haystack[index..index + n] == *self.needle {
                results.push(self.result(index, 1.0, true));
                excluded[index..index + n].fill(true);
                index += n;
            } else {
                index += 1;
            }
        }

        results
    }

    fn fuzzy(&self, excluded: &[bool], max_distance: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();
        if max_distance == 0 {
            return results;
        }

        let n = self.needle.len();
        let mut window: Vec<char> = Vec::with_capacity(n);
        let mut index = 0;

        while index < self.haystack.len() {
            if excluded[index] {
                index += 1;
                continue;
            }

            let end = (index + n).min(self.haystack.len());
            window.clear();
            window.extend_from_slice(&self.haystack[index..end]);

            let distance = strsim::generic_levenshtein(self.needle, &window);
            if distance > 0 && distance <= max_distance {
                let score = 1.0 - distance as f64 / n as f64;
                results.push(self.result(index, score, false));
                index += n;
            } else {
                index += 1;
            }
        }

        results
    }
}

/// Search a single page. Same rules as [`search`].
pub fn search_page(page: &NormalizedPage, query: &str, options: &SearchOptions) -> SearchResults {
    search(std::slice::from_ref(page), query, options)
}

/// Search engine over a fixed set of normalized pages.
///
/// Holds the per-page text index for one document; build a new engine when
/// the document changes.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    pages: Vec<NormalizedPage>,
}

impl SearchEngine {
    pub fn new(pages: Vec<NormalizedPage>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[NormalizedPage] {
        &self.pages
    }

    /// Normalized page by 1-based page number.
    pub fn page(&self, page_number: usize) -> Option<&NormalizedPage> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchResults {
        search(&self.pages, query, options)
    }
}
