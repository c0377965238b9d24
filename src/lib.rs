// src/lib.rs
// =============================================================================
// Library root: everything except the command line lives here, so the
// crawler can be reused (or driven by a different PageSource) outside the
// wiki-word-counter binary.
//
// Modules:
// - config: crawl settings and validation
// - crawl: the crawler itself
// - export: saving/loading result files
// - text: tokenizing article text
// - wiki: fetching pages from Wikipedia
// =============================================================================

pub mod config;
pub mod crawl;
pub mod export;
pub mod text;
pub mod wiki;
