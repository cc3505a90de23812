// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Single page: fetch one URL and list its links (page.rs)
// - Bounded breadth-first crawl from one seed (queue.rs)
// - One concurrent crawl per link of a start page (dispatch.rs)
//
// Rust concepts:
// - Async programming: tokio tasks and channels
// - Collections: HashSet for visited URLs, VecDeque for the queue
// =============================================================================

mod dispatch;
mod page;
mod queue;

pub use dispatch::{crawl_from, CrawlReport};
pub use page::crawl_page;
