use crate::url::domain::{extract_netloc, extract_scheme};
use crate::{UrlError, UrlResult};

/// Rewrites a server-produced URL onto the operator's base URL
///
/// # Rewrite Steps
///
/// 1. If the URL's scheme differs from the base scheme, replace every
///    occurrence of the URL's scheme text with the base scheme
/// 2. Replace every occurrence of the (possibly rewritten) URL's network
///    location with the base network location
///
/// This is a textual substitution, not a structured rebuild. It is only
/// exact when the scheme and host tokens do not also appear in the path or
/// query; when they do, those occurrences are rewritten as well. There is no
/// general answer when the two addresses differ in more than scheme and host.
///
/// # Arguments
///
/// * `url` - An absolute URL returned by (or built for) the server
/// * `base_url` - The operator-supplied base URL
///
/// # Returns
///
/// * `Ok(String)` - The rewritten URL
/// * `Err(UrlError)` - Either input is not an absolute HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use fhir_walk::url::fixup_url;
///
/// let url = fixup_url(
///     "https://internal.local/fhir/Patient?page=2",
///     "http://public.example/fhir",
/// )
/// .unwrap();
/// assert_eq!(url, "http://public.example/fhir/Patient?page=2");
/// ```
pub fn fixup_url(url: &str, base_url: &str) -> UrlResult<String> {
    let base_scheme = extract_scheme(base_url)?;
    let configured_scheme = extract_scheme(url)?;

    let mut fixed = url.to_string();
    if base_scheme != configured_scheme {
        fixed = fixed.replace(&configured_scheme, &base_scheme);
    }

    let base_domain =
        extract_netloc(base_url).ok_or_else(|| UrlError::MissingDomain(base_url.to_string()))?;
    let domain = extract_netloc(&fixed).ok_or_else(|| UrlError::MissingDomain(fixed.clone()))?;

    Ok(fixed.replace(domain, base_domain))
}
