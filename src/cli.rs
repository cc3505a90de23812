// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two modes:
// - page: list the links on one page
// - site: crawl from a page, one breadth-first crawl per link it contains
//
// Fetch settings (timeout, user agent) and verbosity are global flags, so
// they work with either subcommand.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "link-crawler",
    version,
    about = "Extract links from a web page or crawl a site breadth-first",
    long_about = "link-crawler fetches a page and prints the links on it, or crawls outward \
                  from it breadth-first and prints every page it visited."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Seconds to wait for each page before giving up
    #[arg(
        long,
        global = true,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// User-Agent header to send (default: link-crawler/<version>)
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every link found on a single page
    ///
    /// Example: link-crawler page example.com
    Page {
        /// Page URL; "https://" is added when no scheme is given
        url: String,

        /// Output results in JSON format instead of one URL per line
        #[arg(long)]
        json: bool,
    },

    /// Crawl from a page and print every page visited
    ///
    /// Example: link-crawler site example.com 50
    Site {
        /// Start page URL; "https://" is added when no scheme is given
        url: String,

        /// Maximum pages visited by each per-link crawl
        limit: usize,

        /// Output results in JSON format instead of one URL per line
        #[arg(long)]
        json: bool,
    },
}
