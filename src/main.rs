// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and the HTTP client
// 3. Dispatch to the page or site handler
// 4. Print results to stdout, one URL per line or as JSON
// 5. Exit with proper code (0 = success, 1 = error)
// =============================================================================

mod cli;     // src/cli.rs - command-line parsing
mod crawl;   // src/crawl/ - single page and breadth-first crawling
mod error;   // src/error.rs - crawl error types
mod extract; // src/extract/ - link extraction from HTML
mod fetch;   // src/fetch/ - HTTP capability and page fetching

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use fetch::{FetchConfig, HttpClient, ReqwestClient};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = fetch_config(&cli);
    let client = ReqwestClient::new(&config).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Page { url, json } => handle_page(&client, &url, json, &config).await,
        Commands::Site { url, limit, json } => {
            handle_site(Arc::new(client), &url, limit, json, &config).await
        }
    }
}

// Logs go to stderr so stdout only carries results
//
// RUST_LOG wins when set; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "link_crawler=debug,warn"
    } else {
        "link_crawler=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fetch_config(cli: &Cli) -> FetchConfig {
    let defaults = FetchConfig::default();
    FetchConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        user_agent: cli.user_agent.clone().unwrap_or(defaults.user_agent),
    }
}

// JSON shape for the page subcommand
#[derive(Serialize)]
struct PageLinks<'a> {
    url: &'a str,
    links: &'a [String],
}

// Handles the 'page' subcommand
//
// Any error here is fatal: without the page there is nothing to print
async fn handle_page(client: &dyn HttpClient, url: &str, json: bool, config: &FetchConfig) -> Result<()> {
    info!(url = %url, "crawling page");

    let links = crawl::crawl_page(client, url, config)
        .await
        .with_context(|| format!("could not crawl {}", url))?;

    info!(url = %url, links = links.len(), "found links");

    if json {
        let output = serde_json::to_string_pretty(&PageLinks { url, links: &links })?;
        print_output(|out| writeln!(out, "{}", output))
    } else {
        print_output(|out| write_urls(out, &links))
    }
}

// Handles the 'site' subcommand
//
// Only the start page can fail the command; broken pages further out are
// logged and skipped by the crawl itself
async fn handle_site(
    client: Arc<dyn HttpClient>,
    url: &str,
    limit: usize,
    json: bool,
    config: &FetchConfig,
) -> Result<()> {
    let report = crawl::crawl_from(client, url, limit, config)
        .await
        .with_context(|| format!("could not crawl start page {}", url))?;

    print_report(&report, json)
}

fn print_report(report: &crawl::CrawlReport, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(report)?;
        print_output(|out| writeln!(out, "{}", output))
    } else {
        print_output(|out| write_urls(out, &report.visited))
    }
}

// Writes results through a locked stdout
fn print_output(write: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = write(&mut out).and_then(|()| out.flush());
    finish_output(result)
}

// A reader that went away early (`| head`) is not an error
fn finish_output(result: io::Result<()>) -> Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => Ok(result.context("failed to write results")?),
    }
}

fn write_urls(out: &mut dyn Write, urls: &[String]) -> io::Result<()> {
    for url in urls {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}
