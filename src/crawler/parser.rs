//! HTML parser for extracting page content and anchors
//!
//! This module turns a fetched HTML body into a `ParsedDocument`:
//! - Page title (from the first `<title>` tag)
//! - Full document text
//! - Raw `href` values of every anchor, unresolved

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// The page title, empty if the page has none
    pub title: String,

    /// All text nodes of the document, concatenated
    pub text: String,

    /// `href` attribute of every `<a>` element, in document order
    pub raw_links: Vec<String>,
}

/// Parses HTML content into a `ParsedDocument`
///
/// Parsing never fails: html5ever recovers from malformed markup, and a
/// missing title degrades to an empty string.
///
/// # Example
///
/// ```
/// use site_spider::crawler::parse_document;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_document(html);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.raw_links, vec!["/page".to_string()]);
/// ```
pub fn parse_document(html: &str) -> ParsedDocument {
    let document = Html::parse_document(html);

    ParsedDocument {
        title: extract_title(&document),
        text: extract_text(&document),
        raw_links: extract_hrefs(&document),
    }
}

/// Extracts the page title text as written, surrounding whitespace included
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default()
}

fn extract_text(document: &Html) -> String {
    document.root_element().text().collect()
}

/// Collects anchor hrefs exactly as written; resolution happens in the normalizer
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
