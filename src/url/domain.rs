use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the scheme of an absolute HTTP(S) URL
///
/// The URL must parse and use `http` or `https`. The returned scheme is
/// lowercase, as produced by the `url` crate.
///
/// # Examples
///
/// ```
/// use fhir_walk::url::extract_scheme;
///
/// assert_eq!(extract_scheme("https://example.com/fhir").unwrap(), "https");
/// assert!(extract_scheme("ftp://example.com/").is_err());
/// ```
pub fn extract_scheme(url: &str) -> UrlResult<String> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.scheme().to_string()),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}

/// Extracts the network location of a URL as it appears in the text
///
/// The network location is everything between `://` and the first `/`, `?`
/// or `#`, so userinfo and an explicit port (even a default one) are kept
/// exactly as written.
///
/// # Returns
///
/// * `Some(&str)` - The non-empty network location
/// * `None` - If the URL has no `://` or an empty authority
///
/// # Examples
///
/// ```
/// use fhir_walk::url::extract_netloc;
///
/// assert_eq!(extract_netloc("http://host:8080/fhir?x=1"), Some("host:8080"));
/// assert_eq!(extract_netloc("Patient?page=2"), None);
/// ```
pub fn extract_netloc(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];

    if netloc.is_empty() {
        None
    } else {
        Some(netloc)
    }
}
