// src/text/tokenize.rs
// =============================================================================
// This module splits text into normalized word tokens.
//
// How a token is produced:
// 1. Every punctuation character is removed (not replaced by a space,
//    so "rock-and-roll" becomes "rockandroll")
// 2. The text is lowercased
// 3. The text is split on whitespace
//
// The punctuation table lives inside the Tokenizer value instead of being a
// global, so different tokenizers can use different tables side by side.
//
// Rust concepts:
// - HashSet<char>: Fast "is this character punctuation?" lookups
// - Iterators: filter() + split_whitespace() + map() chains
// - Default trait: A Tokenizer::default() with the usual ASCII table
// =============================================================================

use std::collections::{BTreeMap, HashSet};

/// Same characters as ASCII punctuation: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

// Splits text into lowercase, punctuation-free tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    punctuation: HashSet<char>,
}

impl Tokenizer {
    /// Creates a tokenizer that strips the given characters
    pub fn with_punctuation(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            punctuation: chars.into_iter().collect(),
        }
    }

    // Returns every token in the text, in order, duplicates included
    //
    // Example:
    //   "The cat, the DOG!" -> ["the", "cat", "the", "dog"]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .chars()
            .filter(|c| !self.punctuation.contains(c))
            .collect();

        stripped
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    // Counts how many times each token occurs in the text
    pub fn count(&self, text: &str) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_punctuation(ASCII_PUNCTUATION.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_split() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("The Cat\tsat\n on  the MAT"),
            vec!["the", "cat", "sat", "on", "the", "mat"]
        );
    }

    #[test]
    fn test_punctuation_removed_not_split() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("rock-and-roll isn't (really) dead."),
            vec!["rockandroll", "isnt", "really", "dead"]
        );
    }

    #[test]
    fn test_punctuation_only_text_has_no_tokens() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("... -- !!").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_kept() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("Café Zürich"), vec!["café", "zürich"]);
    }

    #[test]
    fn test_custom_punctuation_table() {
        let tokenizer = Tokenizer::with_punctuation(['!']);
        assert_eq!(tokenizer.tokenize("hi! there."), vec!["hi", "there."]);
    }

    #[test]
    fn test_count() {
        let tokenizer = Tokenizer::default();
        let counts = tokenizer.count("cat dog cat");
        assert_eq!(counts.get("cat"), Some(&2));
        assert_eq!(counts.get("dog"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
