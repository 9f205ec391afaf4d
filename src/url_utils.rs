//! URL Utility Functions
//!
//! Resolution of link and image URLs found inside the content root against
//! the document's base URL.

use url::Url;

/// Image URLs longer than this are discarded rather than truncated.
pub const MAX_IMAGE_URL_LEN: usize = 255;

/// Schemes that are never resolved against a base URL.
const OPAQUE_PREFIXES: &[&str] = &["data:", "javascript:", "mailto:", "tel:"];

/// Parse an absolute http(s) URL with a host.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_base_url(url_str: &str) -> Option<Url> {
    let s = url_str.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve `url_str` against `base`.
///
/// Without a base, or when resolution fails, the trimmed input is returned
/// unchanged. Opaque URLs (`data:`, `mailto:`, ...) are never resolved.
#[must_use]
pub fn resolve_url(url_str: &str, base: Option<&Url>) -> String {
    let url_str = url_str.trim();
    if url_str.is_empty() || OPAQUE_PREFIXES.iter().any(|p| url_str.starts_with(p)) {
        return url_str.to_string();
    }

    match base.map(|base| base.join(url_str)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => url_str.to_string(),
    }
}

/// Replace literal spaces with `%20`.
#[must_use]
pub fn escape_spaces(url_str: &str) -> String {
    url_str.replace(' ', "%20")
}

/// URL of a chosen image from its raw `src`.
///
/// Spaces are escaped before resolving. Returns `None` for URLs that end up
/// longer than [`MAX_IMAGE_URL_LEN`].
#[must_use]
pub fn image_url(src: &str, base: Option<&Url>) -> Option<String> {
    let url = resolve_url(&escape_spaces(src), base);
    if url.is_empty() || url.chars().count() > MAX_IMAGE_URL_LEN {
        tracing::debug!(len = url.len(), "discarding image url");
        return None;
    }
    Some(url)
}
