//! URL handling module for Site-Spider
//!
//! This module provides link normalization and file classification
//! (the `LinkRef` produced for every usable anchor) plus host extraction
//! used to keep the crawl on the seed's host.

mod domain;
mod normalize;

use serde::Serialize;

// Re-export main functions
pub use domain::{extract_domain, host_key, is_same_host};
pub use normalize::{canonicalize, normalize, resolve_link, resolve_location};

/// Path extensions that mark a link as a downloadable file rather than a page
///
/// Matched case-insensitively against the end of the resolved path.
pub const FILE_EXTENSIONS: &[&str] = &[
    ".jpg", ".png", ".gif", ".pdf", ".docx", ".odt", ".doc", ".pptx", ".csv", ".xlsx",
];

/// A canonical outgoing link found on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkRef {
    /// Absolute URI without query, fragment or trailing slash
    pub uri: String,

    /// True if the link points at a non-HTML document or media file
    pub is_file: bool,
}

impl LinkRef {
    /// Creates a link to a page
    pub fn page(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            is_file: false,
        }
    }

    /// Creates a link to a file
    pub fn file(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            is_file: true,
        }
    }
}

/// Returns true if the path ends in one of the known file extensions
pub fn is_file_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
