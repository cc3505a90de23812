// src/extract/mod.rs
// =============================================================================
// This module turns fetched HTML into a list of absolute links.
//
// Submodules:
// - html: parses the page and walks it for <a href> targets
// =============================================================================

mod html;

pub use html::{extract_links, parse_html};
