// src/crawl/queue.rs
// =============================================================================
// This module implements a bounded breadth-first crawl from one seed URL.
//
// How it works:
// 1. Start with the seed URL in a queue (the frontier)
// 2. Take the URL at the front and crawl it (fetch + extract links)
// 3. Add every link we have not seen before to the back of the queue
// 4. Mark the URL visited and send it on the result channel
// 5. Repeat until `limit` pages were visited or the queue is empty
// 6. Send one Finished event so the receiver knows this crawl is over
//
// A page that fails to load is logged and skipped; it never stops the crawl.
// The frontier and the `seen` set (queued or visited URLs) belong to this one
// crawl only.
//
// Rust concepts:
// - VecDeque: FIFO queue for breadth-first order
// - HashSet: fast "have we seen this URL?" checks
// - mpsc channels: streaming results to another task
// =============================================================================

use super::page::crawl_page;
use crate::fetch::{ensure_scheme, FetchConfig, HttpClient};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc;
use tracing::{debug, warn};

// What one finished crawl did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    /// Where this crawl started
    pub seed: String,
    /// Pages successfully visited (and emitted)
    pub visited: usize,
    /// Pages that could not be crawled
    pub failed: usize,
}

// Messages a site crawl sends while it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A page was crawled; sent in visit order
    Visited { seed: String, url: String },
    /// Always the last message of a crawl
    Finished(WorkerSummary),
}

// Crawls breadth-first from `seed` until `limit` pages were visited
//
// Parameters:
//   client: the HTTP capability to fetch through
//   seed: the starting URL (a bare domain gets "https://")
//   limit: maximum number of pages to visit
//   config: fetch settings
//   tx: where Visited/Finished events are sent
//
// Returns: the same summary that was sent in the Finished event
//
// If the receiving side of `tx` is gone the crawl stops early.
pub async fn crawl_site(
    client: &dyn HttpClient,
    seed: &str,
    limit: usize,
    config: &FetchConfig,
    tx: &mpsc::Sender<CrawlEvent>,
) -> WorkerSummary {
    let seed = ensure_scheme(seed.trim());

    let mut frontier = VecDeque::from([seed.clone()]);

    // The visited set: every URL ever queued, visited or attempted, so each
    // URL is fetched at most once
    let mut seen = HashSet::from([seed.clone()]);

    let mut summary = WorkerSummary {
        seed: seed.clone(),
        visited: 0,
        failed: 0,
    };

    while summary.visited < limit {
        let Some(url) = frontier.pop_front() else {
            break;
        };

        let links = match crawl_page(client, &url, config).await {
            Ok(links) => links,
            Err(e) => {
                warn!(seed = %seed, url = %url, error = %e, "skipping page");
                summary.failed += 1;
                continue;
            }
        };

        for link in links {
            if seen.insert(link.clone()) {
                frontier.push_back(link);
            }
        }

        summary.visited += 1;
        debug!(seed = %seed, url = %url, queued = frontier.len(), "visited page");

        let event = CrawlEvent::Visited {
            seed: seed.clone(),
            url,
        };
        if tx.send(event).await.is_err() {
            debug!(seed = %seed, "result receiver closed, stopping crawl");
            return summary;
        }
    }

    // Ignored: nobody left to tell
    let _ = tx.send(CrawlEvent::Finished(summary.clone())).await;
    summary
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(url) = frontier.pop_front() else { break };`
//    - Binds `url` if the pattern matches, otherwise runs the else block
//    - The else block must leave the current scope (break/return/continue)
//
// 2. Why does HashSet::insert return a bool?
//    - true = the value was new, false = it was already there
//    - That lets us check and record a URL in one step
//
// 3. What is mpsc?
//    - "multiple producer, single consumer" channel
//    - Many crawl tasks can hold a Sender; one task holds the Receiver
//    - send().await waits when the channel's buffer is full
//
// 4. Breadth-first vs depth-first:
//    - push_back + pop_front = queue = breadth-first
//    - push_back + pop_back would be a stack = depth-first
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::stub::StubClient;

    fn tree_client() -> StubClient {
        // seed -> a, b; a -> c, seed; b -> (nothing); c -> a
        StubClient::new()
            .page(
                "https://seed.com",
                r#"<a href="https://a.com">A</a><a href="https://b.com">B</a>"#,
            )
            .page(
                "https://a.com",
                r#"<a href="https://c.com">C</a><a href="https://seed.com">home</a>"#,
            )
            .page("https://b.com", "<p>no links here</p>")
            .page("https://c.com", r#"<a href="https://a.com">back</a>"#)
    }

    async fn run(client: &StubClient, seed: &str, limit: usize) -> (WorkerSummary, Vec<CrawlEvent>) {
        let (tx, mut rx) = mpsc::channel(100);
        let summary = crawl_site(client, seed, limit, &FetchConfig::default(), &tx).await;
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (summary, events)
    }

    fn visited_urls(events: &[CrawlEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                CrawlEvent::Visited { url, .. } => Some(url.clone()),
                CrawlEvent::Finished(_) => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_bfs_order_stops_at_limit() {
        let client = tree_client();
        let (summary, events) = run(&client, "https://seed.com", 3).await;

        assert_eq!(
            visited_urls(&events),
            vec!["https://seed.com", "https://a.com", "https://b.com"]
        );
        assert_eq!(summary.visited, 3);
        // c.com was queued but never fetched
        assert!(!client.requests().contains(&"https://c.com".to_string()));
    }

    #[tokio::test]
    async fn test_bfs_order_reaches_grandchild() {
        let client = tree_client();
        let (_, events) = run(&client, "https://seed.com", 4).await;

        assert_eq!(
            visited_urls(&events),
            vec![
                "https://seed.com",
                "https://a.com",
                "https://b.com",
                "https://c.com"
            ]
        );
    }

    #[tokio::test]
    async fn test_cycles_do_not_refetch() {
        let client = tree_client();
        let (summary, _) = run(&client, "https://seed.com", 10).await;

        assert_eq!(summary.visited, 4);
        assert_eq!(client.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_finished_is_last_event() {
        let client = tree_client();
        let (summary, events) = run(&client, "https://seed.com", 2).await;

        assert_eq!(events.len(), 3);
        assert_eq!(events.last(), Some(&CrawlEvent::Finished(summary)));
    }

    #[tokio::test]
    async fn test_seed_without_links() {
        let client = StubClient::new().page("https://lonely.com", "<p>just text</p>");
        let (summary, events) = run(&client, "https://lonely.com", 5).await;

        assert_eq!(visited_urls(&events), vec!["https://lonely.com"]);
        assert_eq!(
            summary,
            WorkerSummary {
                seed: "https://lonely.com".to_string(),
                visited: 1,
                failed: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_failed_page_does_not_stop_crawl() {
        let client = StubClient::new()
            .page(
                "https://seed.com",
                r#"<a href="https://broken.com">x</a><a href="https://gone.com">y</a><a href="https://fine.com">z</a>"#,
            )
            .fail("https://broken.com", "connection refused")
            .status("https://gone.com", 404, "not found")
            .page("https://fine.com", "<p>ok</p>");

        let (summary, events) = run(&client, "https://seed.com", 10).await;

        assert_eq!(
            visited_urls(&events),
            vec!["https://seed.com", "https://fine.com"]
        );
        assert_eq!(summary.visited, 2);
        assert_eq!(summary.failed, 2);
    }

    #[tokio::test]
    async fn test_failed_pages_do_not_use_up_limit() {
        let client = StubClient::new()
            .page(
                "https://seed.com",
                r#"<a href="https://broken.com">x</a><a href="https://fine.com">y</a><a href="https://seed.com">self</a>"#,
            )
            .fail("https://broken.com", "connection refused")
            .page("https://fine.com", r#"<a href="https://seed.com">home</a>"#);

        let (summary, events) = run(&client, "https://seed.com", 2).await;

        assert_eq!(
            visited_urls(&events),
            vec!["https://seed.com", "https://fine.com"]
        );
        assert_eq!(summary.failed, 1);
        assert_eq!(
            client.requests(),
            vec!["https://seed.com", "https://broken.com", "https://fine.com"]
        );
    }

    #[tokio::test]
    async fn test_failed_seed_finishes_empty() {
        let client = StubClient::new().fail("https://down.com", "dns error");
        let (summary, events) = run(&client, "down.com", 5).await;

        assert_eq!(summary.visited, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(events, vec![CrawlEvent::Finished(summary)]);
    }

    #[tokio::test]
    async fn test_zero_limit_visits_nothing() {
        let client = tree_client();
        let (summary, events) = run(&client, "https://seed.com", 0).await;

        assert_eq!(summary.visited, 0);
        assert!(client.requests().is_empty());
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let client = tree_client();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let summary = crawl_site(&client, "https://seed.com", 10, &FetchConfig::default(), &tx).await;

        assert_eq!(summary.visited, 1);
        assert_eq!(client.requests(), vec!["https://seed.com"]);
    }
}
