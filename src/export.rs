// src/export.rs
// =============================================================================
// This module saves and loads crawl results as JSON.
//
// File layout:
// {
//  "meta": {
//   "scraped_pages": ["New York City", "Brooklyn"],
//   "seed_term": "New York City"
//  },
//  "data": {
//   "city": 42,
//   "york": 17
//  }
// }
//
// Words in "data" are sorted and pages are in visit order, so saving the
// same result twice gives byte-identical files.
//
// Rust concepts:
// - serde rename / flatten-free nesting: Rust structs vs. JSON layout
// - BufWriter: Batches small writes into fewer system calls
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// Snapshot of a crawl: which pages were visited and what words they had
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResultDocument", into = "ResultDocument")]
pub struct CrawlResult {
    pub visited_pages: Vec<String>,
    pub seed_term: String,
    pub word_counts: BTreeMap<String, u64>,
}

impl CrawlResult {
    // Returns the `limit` most frequent words, ties broken alphabetically
    pub fn top_words(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut words: Vec<(&str, u64)> = self
            .word_counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();

        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(limit);
        words
    }

    // Total number of word occurrences across all pages
    pub fn total_words(&self) -> u64 {
        self.word_counts.values().sum()
    }
}

// The on-disk shape of a CrawlResult
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultDocument {
    meta: ResultMeta,
    data: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultMeta {
    scraped_pages: Vec<String>,
    seed_term: String,
}

impl From<CrawlResult> for ResultDocument {
    fn from(result: CrawlResult) -> Self {
        Self {
            meta: ResultMeta {
                scraped_pages: result.visited_pages,
                seed_term: result.seed_term,
            },
            data: result.word_counts,
        }
    }
}

impl From<ResultDocument> for CrawlResult {
    fn from(document: ResultDocument) -> Self {
        Self {
            visited_pages: document.meta.scraped_pages,
            seed_term: document.meta.seed_term,
            word_counts: document.data,
        }
    }
}

// Serializes a result to pretty JSON (one-space indent)
pub fn to_json(result: &CrawlResult) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    result.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

// Writes a result to `path`, replacing any existing file
pub fn save(result: &CrawlResult, path: &Path) -> Result<()> {
    let json = to_json(result)?;

    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

// Reads a result previously written by `save`
pub fn load(path: &Path) -> Result<CrawlResult> {
    let file = File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let result = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a valid result file", path.display()))?;
    Ok(result)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What do #[serde(from = ...)] and #[serde(into = ...)] do?
//    - They tell serde to convert through another type
//    - CrawlResult stays flat and easy to use in Rust code
//    - ResultDocument matches the nested JSON layout on disk
//
// 2. Why BTreeMap instead of HashMap?
//    - HashMap iteration order is random
//    - BTreeMap always iterates in sorted key order
//    - Sorted keys = the same JSON every time
//
// 3. What is .with_context()?
//    - An anyhow helper that adds a message to an error
//    - "No such file" becomes "Could not open wwc.json: No such file"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CrawlResult {
        CrawlResult {
            visited_pages: vec!["X".to_string(), "A".to_string()],
            seed_term: "X".to_string(),
            word_counts: [("dog", 1), ("cat", 2), ("ant", 2)]
                .iter()
                .map(|(w, c)| (w.to_string(), *c))
                .collect(),
        }
    }

    #[test]
    fn test_json_layout() {
        let json = to_json(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["seed_term"], "X");
        assert_eq!(value["meta"]["scraped_pages"], serde_json::json!(["X", "A"]));
        assert_eq!(value["data"]["cat"], 2);
        assert!(json.starts_with("{\n \"meta\": {\n  \"scraped_pages\""));
    }

    #[test]
    fn test_words_sorted_in_output() {
        let json = to_json(&sample_result()).unwrap();
        let ant = json.find("\"ant\"").unwrap();
        let cat = json.find("\"cat\"").unwrap();
        let dog = json.find("\"dog\"").unwrap();
        assert!(ant < cat && cat < dog);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wwc.json");

        save(&sample_result(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample_result());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(error.to_string().contains("Could not open"));
    }

    #[test]
    fn test_load_rejects_other_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_top_words() {
        let result = sample_result();
        assert_eq!(result.top_words(2), vec![("ant", 2), ("cat", 2)]);
        assert_eq!(result.top_words(10).len(), 3);
        assert_eq!(result.total_words(), 5);
    }
}
