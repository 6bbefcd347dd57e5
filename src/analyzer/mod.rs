//! String analysis
//!
//! Computes the canonical set of derived properties for an input string.
//! Analysis is a total, pure function: every input (including the empty
//! string) is analyzable, and equal inputs always produce equal output.
//!
//! The SHA-256 digest doubles as the storage key, so the whole system's
//! deduplication contract rests on this module being deterministic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Derived properties of a string, excluding storage metadata.
///
/// `sha256_hash` is the lowercase hex digest of the raw UTF-8 bytes of the
/// value. Any single-byte difference (case, whitespace) yields a different
/// hash and therefore a different record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: HashMap<char, u64>,
}

/// Compute the lowercase hex SHA-256 digest of a value.
///
/// Lookups and deletes recompute this from the candidate value rather than
/// running a full analysis.
pub fn digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Analyze a string and return its derived properties.
pub fn analyze(value: &str) -> AnalyzedProperties {
    let mut character_frequency_map: HashMap<char, u64> = HashMap::new();
    for ch in value.chars() {
        *character_frequency_map.entry(ch).or_insert(0) += 1;
    }

    let length = value.chars().count();
    let unique_characters = character_frequency_map.len();

    // split_whitespace trims and collapses runs, so an all-whitespace value
    // yields zero tokens.
    let word_count = value.split_whitespace().count();

    // Palindrome check runs over the value with everything outside ASCII
    // [0-9A-Za-z] removed and letters lower-cased. An empty normalized
    // string is never a palindrome.
    let normalized: Vec<char> = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let is_palindrome =
        !normalized.is_empty() && normalized.iter().eq(normalized.iter().rev());

    AnalyzedProperties {
        length,
        is_palindrome,
        unique_characters,
        word_count,
        sha256_hash: digest(value),
        character_frequency_map,
    }
}
