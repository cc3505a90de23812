// src/crawl/page.rs
// =============================================================================
// This module crawls a single page: URL in, list of outbound links out.
//
// Steps:
// 1. Add a scheme if missing and check the result is a real URL
// 2. Fetch the body (see fetch::fetch_page)
// 3. Parse it as HTML
// 4. Extract and normalize the links
//
// Any error is handed back to the caller untouched; nothing is retried.
// =============================================================================

use crate::error::CrawlError;
use crate::extract::{extract_links, parse_html};
use crate::fetch::{ensure_scheme, fetch_page, FetchConfig, HttpClient};
use url::Url;

// Fetches one page and returns the links found on it
//
// Parameters:
//   client: the HTTP capability to fetch through
//   url: page URL; a bare domain like "example.com" is accepted
//   config: fetch settings
//
// Returns: the page's links in document order, duplicates kept
pub async fn crawl_page(
    client: &dyn HttpClient,
    url: &str,
    config: &FetchConfig,
) -> Result<Vec<String>, CrawlError> {
    let url = validate_url(url)?;
    let body = fetch_page(client, &url, config).await?;

    // Html is not Send, so parsing stays out of the async part
    links_from_body(&body, &url)
}

// Adds a scheme and makes sure what we have is an http(s) URL with a host
//
// Fails before any network access happens
pub fn validate_url(url: &str) -> Result<String, CrawlError> {
    let trimmed = url.trim();
    let url = ensure_scheme(trimmed);

    let parsed = Url::parse(&url).map_err(|e| CrawlError::Validation {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CrawlError::Validation {
            url: trimmed.to_string(),
            reason: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

fn links_from_body(body: &[u8], url: &str) -> Result<Vec<String>, CrawlError> {
    let document = parse_html(body, url)?;
    Ok(extract_links(&document, url))
}
