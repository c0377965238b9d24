// src/wiki/mod.rs
// =============================================================================
// This module is everything the crawler needs to know about getting pages.
//
// The crawler never talks HTTP directly. It only sees the PageSource trait:
// "give me the content and outbound links for this page title". That keeps
// the crawler testable with a fake in-memory source.
//
// Submodules:
// - client: PageSource implementation backed by the Wikipedia API
// - html: Turns the rendered article HTML into plain text
//
// Rust concepts:
// - Traits: Shared behaviour that different types can implement
// - async-trait: Lets traits contain async fn (needed for network calls)
// - thiserror: Derives Display + Error for our FetchError enum
// =============================================================================

mod client;
mod html;

pub use client::WikipediaClient;

use async_trait::async_trait;
use thiserror::Error;

// A successfully fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Plain text of the article
    pub content: String,
    /// Titles of the pages this page links to
    pub links: Vec<String>,
}

// Why fetching a page failed
//
// The crawler handles all variants the same way (log, record, move on),
// but keeping them apart makes the logs and the failure list readable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No page with this title exists
    #[error("page not found: {0}")]
    NotFound(String),

    /// The title points at a disambiguation page
    #[error("ambiguous title (disambiguation page): {0}")]
    Ambiguous(String),

    /// Connection problem, timeout or non-success HTTP status
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The response could not be understood
    #[error("could not parse response: {0}")]
    ParseFailure(String),
}

// Anything that can hand the crawler a page by title
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, page_id: &str) -> Result<Page, FetchError>;
}
