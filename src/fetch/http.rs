// src/fetch/http.rs
// =============================================================================
// This module defines the HTTP capability the crawler fetches pages through.
//
// Key functionality:
// - HttpClient: a small trait with a single GET operation
// - ReqwestClient: the real implementation built on reqwest
// - FetchConfig: timeout and user agent shared by every request
//
// The crawler never creates its own client. Callers pass an HttpClient in,
// which lets tests swap in a fixture-backed stub.
//
// Rust concepts:
// - Traits: Shared behaviour behind `dyn HttpClient`
// - async-trait: async methods inside a trait
// - Send + Sync: the client is shared between tokio tasks
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// Settings applied to every page request
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound for one request, body included
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("link-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// A fully read response: status code plus the whole body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

// The one operation the crawler needs from the network
//
// Implementations must read the body completely before returning so the
// connection is released on every path, whatever the status code.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

// HttpClient backed by reqwest
//
// Redirects are NOT followed: a 301/302 comes back as its own status so the
// fetcher can reject it like any other non-200 answer.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        // bytes() consumes the response, draining and closing the stream
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - Code that takes `&dyn HttpClient` works with any implementation
//    - The tests use a stub that answers from a HashMap, no network needed
//
// 2. What does #[async_trait] do?
//    - It rewrites `async fn` in traits into methods returning boxed futures
//    - That makes the trait usable as `dyn HttpClient`
//
// 3. Why Send + Sync?
//    - Every crawl worker is a separate tokio task
//    - They all share one client through an Arc, so it must be thread-safe
// -----------------------------------------------------------------------------
