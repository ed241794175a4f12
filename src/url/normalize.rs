use crate::url::{is_file_path, LinkRef};
use url::Url;

/// Resolves an anchor href against a base URI into a canonical `LinkRef`
///
/// # Normalization Steps
///
/// 1. Parse the base URI; reject if malformed
/// 2. Join the href onto the base (relative and absolute hrefs both work)
/// 3. Reject anything that is not HTTP or HTTPS
/// 4. Reject links carrying a query or a fragment, even an empty one
/// 5. Classify as file by the path extension
/// 6. Strip exactly one trailing slash
///
/// Returns `None` for unusable links. The function is pure: the same
/// inputs always give the same output.
///
/// # Examples
///
/// ```
/// use site_spider::url::normalize;
///
/// let link = normalize("/a/b/", "https://x.com").unwrap();
/// assert_eq!(link.uri, "https://x.com/a/b");
/// assert!(!link.is_file);
///
/// assert!(normalize("/search?q=rust", "https://x.com").is_none());
/// ```
pub fn normalize(href: &str, base_uri: &str) -> Option<LinkRef> {
    let base = Url::parse(base_uri).ok()?;
    resolve_link(href, &base)
}

/// Same as [`normalize`] with an already parsed base
pub fn resolve_link(href: &str, base: &Url) -> Option<LinkRef> {
    resolve_location(href, base).map(|(link, _)| link)
}

/// Resolves `href` and also returns the absolute location it points at
///
/// The location keeps its trailing slash, so it is the right base for the
/// relative links found on the target page. The `LinkRef` is the canonical
/// identity used for deduplication.
pub fn resolve_location(href: &str, base: &Url) -> Option<(LinkRef, Url)> {
    let resolved = base.join(href).ok()?;
    let link = canonical_link(&resolved)?;
    Some((link, resolved))
}

/// Canonicalizes an absolute URI (used for the crawl seed)
pub fn canonicalize(uri: &str) -> Option<LinkRef> {
    let url = Url::parse(uri).ok()?;
    canonical_link(&url)
}

fn canonical_link(url: &Url) -> Option<LinkRef> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }

    let is_file = is_file_path(url.path());

    let mut uri = url.to_string();
    if uri.ends_with('/') {
        uri.pop();
    }

    Some(LinkRef { uri, is_file })
}
