// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a tree of nodes
// - Is built on html5ever (Mozilla's HTML parser)
// - Recovers from broken markup instead of failing
//
// We also use the `url` crate to validate absolute hrefs.
//
// How a link is produced:
// 1. Walk the tree depth-first, parent before children
// 2. For every <a> element take its first href attribute
// 3. Keep it only if it is an http(s) URL, a //host reference or a /path
// 4. Rebuild it as host + path + ?query, where a missing host becomes the
//    page's own URL and a host without a scheme gets "https://"
//
// Rust concepts:
// - Recursion: walking a tree
// - Option<T> and ?: early exit for hrefs that are not links
// - Lifetimes: path and query borrow from the href string
// =============================================================================

use crate::error::CrawlError;
use scraper::{ElementRef, Html};
use url::Url;

// Turns a fetched body into an HTML document
//
// html5ever never rejects markup, so the only failure left is a body that
// is not UTF-8 text.
pub fn parse_html(body: &[u8], url: &str) -> Result<Html, CrawlError> {
    let text = std::str::from_utf8(body).map_err(|e| CrawlError::Parse {
        url: url.to_string(),
        reason: format!("body is not valid UTF-8: {}", e),
    })?;

    Ok(Html::parse_document(text))
}

// Extracts all links from a parsed document
//
// Parameters:
//   document: the parsed page
//   page_url: the URL of the page (used as host for relative links)
//
// Returns: Vec<String> in document order, duplicates kept
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   page_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();
    collect_links(document.root_element(), page_url, &mut links);
    links
}

fn collect_links(element: ElementRef<'_>, page_url: &str, links: &mut Vec<String>) {
    if element.value().name() == "a" {
        // First href wins, later duplicates on the same tag are ignored
        let href = element
            .value()
            .attrs()
            .find(|(name, _)| *name == "href")
            .map(|(_, value)| value);

        if let Some(link) = href.and_then(|href| normalize_href(href, page_url)) {
            links.push(link);
        }
    }

    // Anchors can sit anywhere, so every child is visited whether or not
    // this element matched
    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            collect_links(child, page_url, links);
        }
    }
}

// An href split into the pieces the output is built from
#[derive(Debug, PartialEq)]
struct HrefParts<'a> {
    /// Empty for "/path" references
    host: String,
    path: &'a str,
    query: Option<&'a str>,
}

// Builds the absolute form of an href found on page_url
//
// Returns None when the href is not a link at all
//
// Examples (page_url = "https://example.com"):
//   "https://other.com?a=1" -> Some("https://other.com?a=1")
//   "/relative"             -> Some("https://example.com/relative")
//   "//cdn.com/lib.js"      -> Some("https://cdn.com/lib.js")
//   "#main"                 -> None
//   "mailto:me@example.com" -> None
fn normalize_href(href: &str, page_url: &str) -> Option<String> {
    let parts = parse_href(href)?;

    let host = if parts.host.is_empty() {
        page_url.strip_suffix('/').unwrap_or(page_url)
    } else {
        parts.host.as_str()
    };

    let mut link = if host.contains("http") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    link.push_str(parts.path);
    if let Some(query) = parts.query {
        link.push('?');
        link.push_str(query);
    }

    Some(link)
}

fn parse_href(href: &str) -> Option<HrefParts<'_>> {
    let href = href.trim();
    if href.chars().any(char::is_control) {
        return None;
    }

    // Fragments never reach the output; "#top" leaves nothing behind
    let href = match href.split_once('#') {
        Some((before, _)) => before,
        None => href,
    };
    if href.is_empty() {
        return None;
    }

    let (host, rest) = if let Some(after) = href.strip_prefix("//") {
        // Scheme-relative: //host/path
        let end = authority_end(after);
        if end == 0 {
            return None;
        }
        Url::parse(&format!("https:{}", href)).ok()?;
        (after[..end].to_string(), &after[end..])
    } else if href.starts_with('/') {
        (String::new(), href)
    } else {
        // Must be a full http(s) URL; anything else is not a link
        let url = Url::parse(href).ok()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }
        // "http:/a.com" and "https:a.com" parse too, but only "scheme://"
        // tells us where the host starts
        let after = href.get(url.scheme().len()..)?.strip_prefix("://")?;
        let end = authority_end(after);
        if end == 0 {
            return None;
        }
        (format!("{}://{}", url.scheme(), &after[..end]), &after[end..])
    };

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) if query.is_empty() => (path, None),
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    Some(HrefParts { host, path, query })
}

// Length of the authority (host[:port]) at the start of s
fn authority_end(s: &str) -> usize {
    s.find(|c: char| c == '/' || c == '?').unwrap_or(s.len())
}
