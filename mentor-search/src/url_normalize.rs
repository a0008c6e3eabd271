//! URL canonicalisation for candidate-pool deduplication.
//!
//! Two query variants frequently surface the same page with cosmetic URL
//! differences: tracking parameters, fragments, trailing slashes. The
//! dedup key is the canonical form; the resource keeps its original URL.

use url::Url;

/// Tracking query parameters stripped during canonicalisation.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
];

/// Canonicalise a URL for deduplication comparison.
///
/// Lowercases scheme and host (via the `url` parser), removes the fragment
/// and default ports, strips tracking parameters, sorts the remaining query
/// pairs, and drops a trailing slash from non-root paths. Inputs that do
/// not parse as URLs are returned unchanged; they still dedup against
/// byte-identical copies of themselves.
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&query));
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    parsed.to_string()
}
