// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wiki_word_counter::config::{DEFAULT_BRANCH_FACTOR, DEFAULT_MAX_DEPTH};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "wiki-word-counter",
    version = "0.1.0",
    about = "Crawl Wikipedia from a seed topic and count the words on every page visited",
    long_about = "wiki-word-counter starts at one Wikipedia article, follows a random sample of its links \
                  a few levels deep, and counts how often every word appears across all the pages it read."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl Wikipedia and save the word counts to a JSON file
    ///
    /// Example: wiki-word-counter crawl "New York City" --branch-factor 2
    Crawl {
        /// Title of the article to start from (e.g., "New York City")
        seed_term: String,

        /// Maximum crawl depth (default: 3)
        ///
        /// Depth 0 = visit nothing
        /// Depth 1 = just the seed article
        /// Depth 2 = seed article + the links sampled from it
        /// etc.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Number of links followed from every article (default: 5)
        #[arg(long, default_value_t = DEFAULT_BRANCH_FACTOR)]
        branch_factor: usize,

        /// Where to write the result file
        #[arg(short, long, default_value = "wwc.json")]
        output: PathBuf,

        /// Seed for the random link sampler (makes a crawl repeatable)
        #[arg(long)]
        seed: Option<u64>,

        /// Timeout for every single page request, in seconds
        #[arg(long, default_value_t = 10)]
        fetch_timeout: u64,

        /// Stop crawling after this many seconds (default: no limit)
        #[arg(long)]
        deadline: Option<u64>,

        /// How many of the most frequent words to print
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the most frequent words in a saved result file
    ///
    /// Example: wiki-word-counter top wwc.json --limit 50
    Top {
        /// Result file written by the crawl command
        file: PathBuf,

        /// How many words to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}
