// src/fetch/mod.rs
// =============================================================================
// This module gets page bodies off the network.
//
// Submodules:
// - http: the HttpClient capability and its reqwest implementation
// - page: fetches one page and validates the response
// =============================================================================

mod http;
mod page;

#[cfg(test)]
pub mod stub;

pub use http::{FetchConfig, HttpClient, ReqwestClient};
pub use page::{ensure_scheme, fetch_page};
