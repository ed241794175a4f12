//! Ranked result rendering

use crate::state::Page;
use crate::SpiderError;

/// Longest title shown in the text table
const MAX_TITLE_CHARS: usize = 60;

/// Formats the top `limit` pages as a text table
///
/// Pages are printed in the order given, which after ranking is best first.
pub fn format_results(pages: &[Page], limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>10}  {:>6}  {:>6}  {}\n",
        "rank", "cRank", "lRank", "uri"
    ));

    for page in pages.iter().take(limit) {
        out.push_str(&format!(
            "{:>10.1}  {:>6}  {:>6}  {}",
            page.rank, page.c_rank, page.l_rank, page.uri
        ));
        if !page.content.title.is_empty() {
            out.push_str(&format!("  ({})", truncate_title(&page.content.title)));
        }
        out.push('\n');
    }

    if pages.len() > limit {
        out.push_str(&format!("... {} more\n", pages.len() - limit));
    }

    out
}

/// Serializes the top `limit` pages as a pretty JSON array
pub fn results_json(pages: &[Page], limit: usize) -> Result<String, SpiderError> {
    let top: Vec<&Page> = pages.iter().take(limit).collect();
    Ok(serde_json::to_string_pretty(&top)?)
}

/// Collapses whitespace in a title and cuts it to a display width
pub fn truncate_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_TITLE_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(MAX_TITLE_CHARS - 3).collect();
    cut.push_str("...");
    cut
}
