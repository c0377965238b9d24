// src/config.rs
// =============================================================================
// This file defines the configuration of a single crawl run.
//
// A CrawlConfig is built once (from the command line or from a test) and is
// never changed afterwards. The crawler only ever reads it.
//
// What gets validated here:
// - The seed term must contain something other than whitespace
// - The branch factor must be at least 1
//
// A max depth of 0 is allowed: it simply means nothing gets visited.
//
// Rust concepts:
// - Builder-style methods: with_xxx(self, ...) -> Self
// - thiserror: Deriving std::error::Error for our own error enum
// - Duration: A span of time from the standard library
// =============================================================================

use std::time::Duration;
use thiserror::Error;

/// How many link hops away from the seed page we go by default
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// How many outbound links we follow from every page by default
pub const DEFAULT_BRANCH_FACTOR: usize = 5;

/// Per-request timeout used when none is given
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Errors that stop a crawler from being created at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("seed term must not be empty")]
    EmptySeedTerm,

    #[error("branch factor must be at least 1 (got {0})")]
    InvalidBranchFactor(usize),
}

// Immutable settings for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Title of the page we start from
    pub seed_term: String,
    /// Exclusive upper bound on depth: pages at depth >= max_depth are skipped
    pub max_depth: usize,
    /// Number of links sampled (without replacement) from each visited page
    pub branch_factor: usize,
    /// Fixed seed for the link sampler, None = random every run
    pub rng_seed: Option<u64>,
    /// Timeout applied to every single page fetch
    pub fetch_timeout: Duration,
    /// Overall time budget for the crawl, None = no limit
    pub deadline: Option<Duration>,
}

impl CrawlConfig {
    /// Creates a config with the default depth (3) and branch factor (5)
    ///
    /// Fails if the seed term is blank.
    pub fn new(seed_term: impl Into<String>) -> Result<Self, ConfigError> {
        let seed_term = seed_term.into();
        if seed_term.trim().is_empty() {
            return Err(ConfigError::EmptySeedTerm);
        }

        Ok(Self {
            seed_term,
            max_depth: DEFAULT_MAX_DEPTH,
            branch_factor: DEFAULT_BRANCH_FACTOR,
            rng_seed: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            deadline: None,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the branch factor, rejecting 0
    pub fn with_branch_factor(mut self, branch_factor: usize) -> Result<Self, ConfigError> {
        if branch_factor < 1 {
            return Err(ConfigError::InvalidBranchFactor(branch_factor));
        }
        self.branch_factor = branch_factor;
        Ok(self)
    }

    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Re-checks every invariant
    ///
    /// The fields are public, so a config can be put together by hand.
    /// The crawler calls this before it accepts a config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_term.trim().is_empty() {
            return Err(ConfigError::EmptySeedTerm);
        }
        if self.branch_factor < 1 {
            return Err(ConfigError::InvalidBranchFactor(self.branch_factor));
        }
        Ok(())
    }
}
