// src/fetch/stub.rs
// =============================================================================
// A fixture-backed HttpClient for tests.
//
// Each URL maps to a canned reply. URLs without a fixture fail like an
// unreachable host. Every request is recorded so tests can check what was
// fetched and in which order.
// =============================================================================

use super::http::{HttpClient, HttpResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum StubReply {
    Response { status: u16, body: String },
    Fail(String),
    Hang,
}

#[derive(Debug, Default)]
pub struct StubClient {
    replies: HashMap<String, StubReply>,
    requests: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 200 OK with the given HTML
    pub fn page(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            url.to_string(),
            StubReply::Response {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.replies
            .insert(url.to_string(), StubReply::Fail(reason.to_string()));
        self
    }

    /// Never answers
    pub fn hang(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), StubReply::Hang);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.replies.get(url).cloned() {
            Some(StubReply::Response { status, body }) => Ok(HttpResponse {
                status,
                body: body.into_bytes(),
            }),
            Some(StubReply::Fail(reason)) => Err(anyhow!(reason)),
            Some(StubReply::Hang) => std::future::pending().await,
            None => Err(anyhow!("could not connect to {}", url)),
        }
    }
}
