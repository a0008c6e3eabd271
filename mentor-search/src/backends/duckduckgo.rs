//! DuckDuckGo search backend.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`,
//! which needs no JavaScript and tolerates automated requests better than
//! the main site. Transport and parsing are split so the parser can be
//! tested against captured HTML.

use scraper::{Html, Selector};
use url::Url;

use crate::backend::SearchBackend;
use crate::config::DiscoveryConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::RawHit;

/// DuckDuckGo HTML scraper.
pub struct DuckDuckGoBackend;

impl DuckDuckGoBackend {
    /// Extract the destination URL from DuckDuckGo's redirect wrapper.
    ///
    /// Result links look like
    /// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=…`; the real
    /// URL is the decoded `uddg` parameter. Direct links pass through.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl SearchBackend for DuckDuckGoBackend {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &DiscoveryConfig,
    ) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(config)?;

        let response = client
            .post("https://html.duckduckgo.com/html/")
            .form(&[("q", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_results(&html, max_results)
    }
}

/// Parse a DuckDuckGo HTML results page into raw hits.
pub(crate) fn parse_results(html: &str, max_results: usize) -> Result<Vec<RawHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let Some(href) = title_el.value().attr("href") else {
            continue;
        };

        let Some(url) = DuckDuckGoBackend::extract_url(href) else {
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(RawHit {
            title,
            url,
            snippet,
        });

        if hits.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
