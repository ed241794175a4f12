//! Term splitting and occurrence counting for the content score

/// Weight of a term occurrence in the page title
pub const TITLE_WEIGHT: u64 = 2;

/// Weight of a term occurrence in the page text
pub const TEXT_WEIGHT: u64 = 1;

/// Splits a query into lower-cased terms on the literal space character
///
/// Consecutive, leading or trailing spaces produce empty terms, which are
/// kept: an empty term matches at every character boundary.
pub fn query_terms(query: &str) -> Vec<String> {
    query.to_lowercase().split(' ').map(str::to_string).collect()
}

/// Counts non-overlapping literal occurrences of `term` in `haystack`
///
/// An empty term counts `chars + 1` matches.
pub fn count_occurrences(haystack: &str, term: &str) -> u64 {
    haystack.matches(term).count() as u64
}

/// Title-weighted term frequency of `terms` in a page
///
/// `terms` must already be lower-cased; title and text are lower-cased here.
pub fn content_score(terms: &[String], title: &str, text: &str) -> u64 {
    let title = title.to_lowercase();
    let text = text.to_lowercase();

    terms
        .iter()
        .map(|term| {
            count_occurrences(&title, term) * TITLE_WEIGHT
                + count_occurrences(&text, term) * TEXT_WEIGHT
        })
        .sum()
}

/// Final rank from content and link scores: `(c * l + l) / 2`
pub fn combine(c_rank: u64, l_rank: u64) -> f64 {
    let c = c_rank as f64;
    let l = l_rank as f64;
    (c * l + l) / 2.0
}
