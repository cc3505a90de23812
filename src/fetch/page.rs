// src/fetch/page.rs
// =============================================================================
// This module fetches the raw body of a single page.
//
// What happens for each URL:
// 1. Add "https://" if the URL has no http/https scheme
// 2. GET it through the injected HttpClient, bounded by the configured timeout
// 3. Reject anything that is not exactly 200 OK
// 4. Reject an empty body
//
// No redirects are followed and nothing is retried.
// =============================================================================

use super::http::{FetchConfig, HttpClient};
use crate::error::CrawlError;
use tracing::debug;

// Prepends "https://" unless the URL already starts with http:// or https://
//
// Examples:
//   "example.com"         -> "https://example.com"
//   "http://example.com"  -> "http://example.com"
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

// Fetches a page and returns its body bytes
//
// Parameters:
//   client: the HTTP capability to use
//   url: page to fetch, with or without a scheme
//   config: request timeout
//
// Returns: the body, or the CrawlError describing why there is none
pub async fn fetch_page(
    client: &dyn HttpClient,
    url: &str,
    config: &FetchConfig,
) -> Result<Vec<u8>, CrawlError> {
    let url = ensure_scheme(url);

    let response = match tokio::time::timeout(config.timeout, client.get(&url)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            return Err(CrawlError::Transport {
                url,
                reason: format!("{:#}", e),
            })
        }
        Err(_) => {
            return Err(CrawlError::Transport {
                url,
                reason: format!("request timed out after {:?}", config.timeout),
            })
        }
    };

    if response.status != 200 {
        return Err(CrawlError::BadStatus {
            url,
            code: response.status,
        });
    }

    if response.body.is_empty() {
        return Err(CrawlError::EmptyBody { url });
    }

    debug!(url = %url, bytes = response.body.len(), "fetched page");
    Ok(response.body)
}
