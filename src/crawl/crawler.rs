// src/crawl/crawler.rs
// =============================================================================
// This module implements the word-counting crawl.
//
// How it works:
// 1. Start with the seed page at depth 0 on a worklist (a stack)
// 2. Pop a page; skip it if it's too deep or was already visited
// 3. Mark it visited BEFORE fetching, so it's never fetched twice
// 4. Fetch it; on success add its words to the running counts
// 5. Pick `branch_factor` random links from the page
// 6. Push them (depth + 1) so they're visited next, first pick first
// 7. Repeat until the worklist is empty (or the deadline passes)
//
// Because children go on a stack, the crawl is depth-first: the first
// sampled link's whole subtree is finished before the second one starts.
//
// Failures never stop the crawl:
// - A page that can't be fetched stays visited and adds no words
// - A page with too few links still counts its words, but we don't go deeper
// Both are logged and kept in `failures()` for the caller.
//
// Rust concepts:
// - Generics: Crawler<S> works with any PageSource (real or fake)
// - HashSet: To track visited pages (O(1) lookup)
// - BTreeMap: Word counts kept sorted, so output is always the same
// =============================================================================

use super::sample::{sample_links, SampleError};
use crate::config::{ConfigError, CrawlConfig};
use crate::export::{self, CrawlResult};
use crate::text::Tokenizer;
use crate::wiki::{FetchError, Page, PageSource};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

// A non-fatal problem hit while crawling
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrawlFailure {
    /// The page could not be fetched; it adds nothing to the counts
    #[error("could not fetch '{page}': {error}")]
    Fetch { page: String, error: FetchError },

    /// The page's words were counted but its links were not followed
    #[error("'{page}' has only {available} link(s), needed {requested}")]
    InsufficientLinks {
        page: String,
        available: usize,
        requested: usize,
    },
}

impl CrawlFailure {
    pub fn page(&self) -> &str {
        match self {
            CrawlFailure::Fetch { page, .. } | CrawlFailure::InsufficientLinks { page, .. } => page,
        }
    }
}

// Crawls pages from a PageSource and counts the words on them
pub struct Crawler<S: PageSource> {
    config: CrawlConfig,
    source: S,
    tokenizer: Tokenizer,
    rng: StdRng,
    visited: HashSet<String>,
    // Same pages as `visited`, in the order they were visited
    visit_order: Vec<String>,
    word_counts: BTreeMap<String, u64>,
    failures: Vec<CrawlFailure>,
}

impl<S: PageSource> Crawler<S> {
    /// Creates a crawler with nothing visited and no words counted
    ///
    /// The config is validated first; an invalid one never gets to crawl.
    /// With `rng_seed` set, link sampling is reproducible.
    pub fn new(config: CrawlConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            source,
            tokenizer: Tokenizer::default(),
            rng,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            word_counts: BTreeMap::new(),
            failures: Vec::new(),
        })
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Replaces the random source used for link sampling
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Crawls from the seed term
    ///
    /// Running again on the same crawler does nothing new: the seed is
    /// already visited. Build a new Crawler for a fresh crawl.
    pub async fn run(&mut self) {
        let deadline = self.config.deadline.map(|budget| Instant::now() + budget);
        let mut worklist = vec![(self.config.seed_term.clone(), 0usize)];

        while let Some((page_id, depth)) = worklist.pop() {
            if deadline.is_some_and(|at| Instant::now() >= at) {
                warn!(
                    abandoned = worklist.len() + 1,
                    "crawl deadline reached, stopping early"
                );
                break;
            }

            let children = self.visit_page(&page_id, depth, deadline).await;

            // Reversed so the first sampled link is popped first
            for child in children.into_iter().rev() {
                worklist.push((child, depth + 1));
            }
        }

        info!(
            pages = self.visit_order.len(),
            distinct_words = self.word_counts.len(),
            failures = self.failures.len(),
            "crawl finished"
        );
    }

    // Visits one page and returns the links to follow from it
    async fn visit_page(
        &mut self,
        page_id: &str,
        depth: usize,
        deadline: Option<Instant>,
    ) -> Vec<String> {
        if depth >= self.config.max_depth {
            debug!(page = %page_id, depth, "depth limit reached");
            return Vec::new();
        }

        if !self.visited.insert(page_id.to_string()) {
            debug!(page = %page_id, "already visited");
            return Vec::new();
        }
        self.visit_order.push(page_id.to_string());

        let page = match self.fetch_before(page_id, deadline).await {
            Ok(page) => page,
            Err(error) => {
                warn!(page = %page_id, %error, "error scraping");
                self.failures.push(CrawlFailure::Fetch {
                    page: page_id.to_string(),
                    error,
                });
                return Vec::new();
            }
        };

        info!(page = %page_id, depth, "scraping");
        self.record_words(&page.content);

        match sample_links(&page.links, self.config.branch_factor, &mut self.rng) {
            Ok(links) => links,
            Err(SampleError::InsufficientLinks {
                available,
                requested,
            }) => {
                warn!(page = %page_id, available, requested, "not enough links to follow");
                self.failures.push(CrawlFailure::InsufficientLinks {
                    page: page_id.to_string(),
                    available,
                    requested,
                });
                Vec::new()
            }
        }
    }

    // Fetches a page, giving up once the crawl deadline passes
    async fn fetch_before(
        &self,
        page_id: &str,
        deadline: Option<Instant>,
    ) -> Result<Page, FetchError> {
        let Some(deadline) = deadline else {
            return self.source.fetch(page_id).await;
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, self.source.fetch(page_id)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::NetworkFailure(
                "crawl deadline reached during fetch".to_string(),
            )),
        }
    }

    fn record_words(&mut self, content: &str) {
        for (token, count) in self.tokenizer.count(content) {
            *self.word_counts.entry(token).or_insert(0) += count;
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn word_counts(&self) -> &BTreeMap<String, u64> {
        &self.word_counts
    }

    /// Every page a fetch was attempted for, in visit order
    pub fn visited_pages(&self) -> &[String] {
        &self.visit_order
    }

    pub fn failures(&self) -> &[CrawlFailure] {
        &self.failures
    }

    /// Snapshot of the current state as a saveable result
    pub fn result(&self) -> CrawlResult {
        CrawlResult {
            visited_pages: self.visit_order.clone(),
            seed_term: self.config.seed_term.clone(),
            word_counts: self.word_counts.clone(),
        }
    }

    /// Writes the current result to a JSON file
    pub fn export_result(&self, destination: &Path) -> Result<()> {
        export::save(&self.result(), destination)
    }
}
