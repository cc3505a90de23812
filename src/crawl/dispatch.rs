// src/crawl/dispatch.rs
// =============================================================================
// This module runs many site crawls at once and gathers their results.
//
// How it works:
// 1. Crawl the start page; if that fails there is nothing to do
// 2. Start one tokio task per distinct link found on it
// 3. Every task runs its own bounded BFS (see queue.rs)
// 4. All tasks send into one channel; we read until every sender is gone
//
// Each task keeps its own visited set, so two tasks may visit the same URL.
// =============================================================================

use super::page::{crawl_page, validate_url};
use super::queue::{crawl_site, CrawlEvent, WorkerSummary};
use crate::error::CrawlError;
use crate::fetch::{FetchConfig, HttpClient};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const CHANNEL_CAPACITY: usize = 64;

// Everything a multi-page crawl produced
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The start page, scheme-qualified
    pub start: String,
    /// Distinct links on the start page; one crawl each
    pub seeds: Vec<String>,
    /// Every visited page, in the order results arrived
    pub visited: Vec<String>,
    /// One entry per crawl, in the order they finished
    pub workers: Vec<WorkerSummary>,
}

// Crawls the start page, then each of its links concurrently
//
// Parameters:
//   client: shared HTTP capability
//   start_url: first page (a bare domain gets "https://")
//   limit: visit limit for EACH per-link crawl
//   config: fetch settings
//
// Returns: the combined report, or the start page's error
pub async fn crawl_from(
    client: Arc<dyn HttpClient>,
    start_url: &str,
    limit: usize,
    config: &FetchConfig,
) -> Result<CrawlReport, CrawlError> {
    let start = validate_url(start_url)?;
    info!(url = %start, limit, "crawling from start page");

    let links = crawl_page(client.as_ref(), &start, config).await?;
    let seeds = distinct(links);
    info!(seeds = seeds.len(), "starting one crawl per link");

    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handles: Vec<_> = seeds
        .iter()
        .cloned()
        .map(|seed| {
            let client = Arc::clone(&client);
            let config = config.clone();
            let tx = tx.clone();
            tokio::spawn(async move { crawl_site(client.as_ref(), &seed, limit, &config, &tx).await })
        })
        .collect();

    // Only the workers hold senders now; recv() returns None once all finish
    drop(tx);

    let mut visited = Vec::new();
    let mut workers = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            CrawlEvent::Visited { url, .. } => visited.push(url),
            CrawlEvent::Finished(summary) => {
                debug!(
                    seed = %summary.seed,
                    visited = summary.visited,
                    failed = summary.failed,
                    "crawl finished"
                );
                workers.push(summary);
            }
        }
    }

    for result in join_all(handles).await {
        if let Err(e) = result {
            warn!(error = %e, "crawl task stopped unexpectedly");
        }
    }

    info!(visited = visited.len(), workers = workers.len(), "all crawls finished");

    Ok(CrawlReport {
        start,
        seeds,
        visited,
        workers,
    })
}

// Drops repeated links, keeping first-seen order
fn distinct(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
