// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing) on stderr
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results
// 5. Exit with proper code (0 = success, 2 = error)
//
// A crawl where some pages failed to load still exits with 0: failed pages
// are reported, the rest of the crawl is still useful.
//
// Rust concepts used:
// - async/await: Because every page fetch is a network request
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - the crawler lives in the library (src/lib.rs),
// only the command-line definition is private to the binary
mod cli;       // src/cli.rs - command-line parsing

use clap::Parser;
use cli::{Cli, Commands};
use wiki_word_counter::config::CrawlConfig;
use wiki_word_counter::crawl::Crawler;
use wiki_word_counter::export::{self, CrawlResult};
use wiki_word_counter::wiki::WikipediaClient;

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays clean
// Level comes from RUST_LOG, defaulting to "info"
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed_term,
            max_depth,
            branch_factor,
            output,
            seed,
            fetch_timeout,
            deadline,
            top,
            json,
        } => {
            let config = CrawlConfig::new(seed_term)?
                .with_max_depth(max_depth)
                .with_branch_factor(branch_factor)?
                .with_rng_seed(seed)
                .with_fetch_timeout(Duration::from_secs(fetch_timeout))
                .with_deadline(deadline.map(Duration::from_secs));

            handle_crawl(config, &output, top, json).await
        }
        Commands::Top { file, limit } => handle_top(&file, limit),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(config: CrawlConfig, output: &Path, top: usize, json: bool) -> Result<i32> {
    let client = WikipediaClient::new(config.fetch_timeout)?;
    let mut crawler = Crawler::new(config, client)?;

    if !json {
        let config = crawler.config();
        println!("🔍 Crawling Wikipedia from: {}", config.seed_term);
        println!(
            "📊 Max depth: {}, links per page: {}",
            config.max_depth, config.branch_factor
        );
    }

    crawler.run().await;

    crawler.export_result(output)?;
    let result = crawler.result();

    if json {
        println!("{}", export::to_json(&result)?);
        return Ok(0);
    }

    println!("📄 Visited {} page(s)", result.visited_pages.len());

    if !crawler.failures().is_empty() {
        println!("\n⚠️  {} problem(s) during the crawl:", crawler.failures().len());
        for failure in crawler.failures() {
            println!("   {}", failure);
        }
    }

    println!();
    print_top_words(&result, top);
    println!("💾 Saved to {}", output.display());

    Ok(0)
}

// Handles the 'top' subcommand
fn handle_top(file: &Path, limit: usize) -> Result<i32> {
    let result = export::load(file)?;

    println!(
        "📄 {} page(s) crawled from \"{}\"",
        result.visited_pages.len(),
        result.seed_term
    );
    println!();
    print_top_words(&result, limit);

    Ok(0)
}

// Prints the most frequent words as a table
fn print_top_words(result: &CrawlResult, limit: usize) {
    println!("{:<6} {:<30} {:>10}", "RANK", "WORD", "COUNT");
    println!("{}", "=".repeat(48));

    for (rank, (word, count)) in result.top_words(limit).into_iter().enumerate() {
        // Truncate very long tokens for display
        let word_display = if word.chars().count() > 27 {
            format!("{}...", word.chars().take(27).collect::<String>())
        } else {
            word.to_string()
        };

        println!("{:<6} {:<30} {:>10}", rank + 1, word_display, count);
    }

    println!();
    println!("📊 Summary:");
    println!("   🔤 Distinct words: {}", result.word_counts.len());
    println!("   📋 Total words: {}", result.total_words());
}
