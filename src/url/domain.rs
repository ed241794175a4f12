use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_spider::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the key used to decide whether a link stays on the crawl's host
///
/// The key is the lowercased host plus the port only when one is written
/// out. The scheme plays no part, so `http://x.com` and `https://x.com`
/// share a key while two local servers on different ports do not.
pub fn host_key(url: &Url) -> Option<String> {
    let domain = extract_domain(url)?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", domain, port)),
        None => Some(domain),
    }
}

/// Checks whether `uri` lives on the host identified by `seed_host`
///
/// Unparsable URIs are never on the same host.
pub fn is_same_host(uri: &str, seed_host: &str) -> bool {
    Url::parse(uri)
        .ok()
        .and_then(|url| host_key(&url))
        .is_some_and(|key| key == seed_host)
}
