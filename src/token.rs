//! Tokenization of raw input into the automaton's alphabet.
//!
//! The alphabet is fixed and small: ASCII lowercase `a`-`z`, one byte per
//! symbol. Everything feeding the builders goes through here first.

use crate::error::{GraphError, Result};

/// Check that `word` is a valid token: nonempty, ASCII lowercase alphabetic.
pub fn validate(word: &str) -> Result<()> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(GraphError::InvalidToken(word.to_string()));
    }
    Ok(())
}

/// Split arbitrary text into tokens: maximal runs of alphabetic characters,
/// lowercased. The result is sorted and deduplicated, ready for ordered
/// insertion into a builder.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut words: Vec<String> = input
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .collect();
    words.sort();
    words.dedup();
    words
}
