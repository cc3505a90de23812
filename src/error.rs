// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Every failure that can happen while turning one URL into its list of links
// is one of these variants. The site crawler logs them and moves on; the CLI
// treats an error on the start page as fatal.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL could not be parsed, even after adding a scheme
    #[error("invalid URL '{url}': {reason}")]
    Validation { url: String, reason: String },

    /// The request could not be performed (DNS, connection, timeout)
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with something other than 200 OK
    #[error("{url} responded with HTTP {code}")]
    BadStatus { url: String, code: u16 },

    /// The server answered 200 OK with a zero-length body
    #[error("no body returned from {url}")]
    EmptyBody { url: String },

    /// The body could not be turned into an HTML document
    #[error("could not parse page {url}: {reason}")]
    Parse { url: String, reason: String },
}
