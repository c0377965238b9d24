// src/text/mod.rs
// =============================================================================
// This module turns raw article text into word tokens.
//
// Submodules:
// - tokenize: Strips punctuation, lowercases, splits on whitespace
// =============================================================================

mod tokenize;

pub use tokenize::Tokenizer;
