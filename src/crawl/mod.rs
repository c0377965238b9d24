// src/crawl/mod.rs
// =============================================================================
// This module handles the Wikipedia crawl itself.
//
// Features:
// - Depth-first crawling starting from a seed page
// - Random link sampling with a fixed branch factor
// - Configurable depth limit and optional overall deadline
// - Word counts accumulated across every page visited
//
// Rust concepts:
// - Async programming: Each page fetch is a network request
// - Collections: HashSet for visited pages, BTreeMap for word counts
// =============================================================================

mod crawler;
mod sample;

// Re-export the crawler so callers can write `crawl::Crawler`
pub use crawler::{CrawlFailure, Crawler};
