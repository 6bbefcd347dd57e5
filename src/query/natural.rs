//! Natural-language query translation
//!
//! Heuristic, pattern-based mapping from a free-text query to a
//! [`StringFilter`]. The rules are applied in a fixed order and a query may
//! trigger several of them; the "first vowel" heuristic deliberately
//! overrides any character extracted by the contains-patterns, and among the
//! contains fallbacks the last matching one wins. That ordering is part of
//! the observable contract and must not be reshuffled.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::filter::StringFilter;

/// Translation failures.
///
/// Both are terminal and deterministic for a given query; the distinction
/// matters to callers because a conflict means the query *was* understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The query is empty or matched no heuristic rule.
    #[error("Unable to parse natural language query")]
    Unparseable,

    /// The rules produced `min_length > max_length`.
    #[error("Query parsed but resulted in conflicting filters")]
    ConflictingFilters,
}

/// A successfully translated query, echoing the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedQuery {
    pub original: String,
    #[serde(rename = "parsed_filters")]
    pub filter: StringFilter,
}

fn word_count_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:single|one) word\b").expect("hard-coded pattern"))
}

fn longer_than_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"longer than (\d+)\s*(?:characters)?").expect("hard-coded pattern"))
}

fn shorter_than_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"shorter than (\d+)\s*(?:characters)?").expect("hard-coded pattern")
    })
}

fn contains_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"contain(?:s|ing)?(?: the)?(?: letter)?\s+([a-z0-9])")
            .expect("hard-coded pattern")
    })
}

fn containing_fallback_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"containing\s+([a-z0-9])").expect("hard-coded pattern"))
}

fn contain_fallback_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"contain\s+([a-z0-9])").expect("hard-coded pattern"))
}

fn first_vowel_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfirst vowel\b").expect("hard-coded pattern"))
}

fn captured_char(re: &Regex, text: &str) -> Option<char> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

fn captured_number(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Translate a free-text query into a structured filter.
///
/// Never inspects stored data; equal queries always translate equally.
pub fn translate(query: &str) -> Result<TranslatedQuery, TranslateError> {
    if query.trim().is_empty() {
        return Err(TranslateError::Unparseable);
    }

    let low = query.to_lowercase();
    let mut filter = StringFilter::default();

    // Rule 1: "single word" / "one word"
    if word_count_pattern().is_match(&low) {
        filter.word_count = Some(1);
    }

    // Rule 2: any mention of the "palindrom" root
    if low.contains("palindrom") {
        filter.is_palindrome = Some(true);
    }

    // Rule 3: "longer than N [characters]" is exclusive, so the bound is N+1
    if let Some(n) = captured_number(longer_than_pattern(), &low) {
        filter.min_length = Some(n.saturating_add(1));
    }

    // Rule 4: "shorter than N [characters]"; N = 0 yields -1, a bound no
    // record can satisfy
    if let Some(n) = captured_number(shorter_than_pattern(), &low) {
        filter.max_length = Some(n.saturating_sub(1));
    }

    // Rule 5: contains-character, with fallback sub-patterns when the
    // primary phrasing does not match. Among the fallbacks the last match
    // wins: later assignments overwrite earlier ones.
    let mut contains = captured_char(contains_pattern(), &low);
    if contains.is_none() {
        for re in [containing_fallback_pattern(), contain_fallback_pattern()] {
            if let Some(ch) = captured_char(re, &low) {
                contains = Some(ch);
            }
        }
    }
    if let Some(ch) = contains {
        filter.contains_character = Some(ch);
    }

    // Rule 6: "first vowel" overrides whatever rule 5 extracted
    if first_vowel_pattern().is_match(&low) {
        filter.contains_character = Some('a');
    }

    if filter.is_empty() {
        return Err(TranslateError::Unparseable);
    }

    if let (Some(min), Some(max)) = (filter.min_length, filter.max_length) {
        if min > max {
            return Err(TranslateError::ConflictingFilters);
        }
    }

    Ok(TranslatedQuery {
        original: query.to_string(),
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(query: &str) -> StringFilter {
        translate(query).expect("query should translate").filter
    }

    #[test]
    fn test_single_word_palindromes() {
        let f = filter("Show me single word palindromes");
        assert_eq!(f.word_count, Some(1));
        assert_eq!(f.is_palindrome, Some(true));
        assert_eq!(f.min_length, None);
        assert_eq!(f.max_length, None);
        assert_eq!(f.contains_character, None);
    }

    #[test]
    fn test_one_word_phrasing() {
        assert_eq!(filter("every one word entry").word_count, Some(1));
    }

    #[test]
    fn test_palindrome_root_matches_variants() {
        assert_eq!(filter("palindromic strings").is_palindrome, Some(true));
        assert_eq!(filter("a palindrome please").is_palindrome, Some(true));
    }

    #[test]
    fn test_longer_than_is_exclusive() {
        assert_eq!(filter("strings longer than 5 characters").min_length, Some(6));
        assert_eq!(filter("longer than 10").min_length, Some(11));
    }

    #[test]
    fn test_shorter_than_is_exclusive() {
        assert_eq!(filter("shorter than 8 characters").max_length, Some(7));
        // "shorter than 0" admits nothing; the bound goes negative rather
        // than clamping to zero, which would wrongly admit empty strings
        assert_eq!(filter("shorter than 0 characters").max_length, Some(-1));
    }

    #[test]
    fn test_contains_letter() {
        assert_eq!(filter("containing the letter z").contains_character, Some('z'));
        assert_eq!(filter("contains the letter q").contains_character, Some('q'));
        assert_eq!(filter("strings that contain x").contains_character, Some('x'));
        assert_eq!(filter("containing 7").contains_character, Some('7'));
    }

    #[test]
    fn test_contains_is_lowercased_with_query() {
        assert_eq!(filter("CONTAINING THE LETTER Z").contains_character, Some('z'));
    }

    #[test]
    fn test_first_vowel_overrides_contains() {
        let f = filter("containing the letter z and the first vowel");
        assert_eq!(f.contains_character, Some('a'));
    }

    #[test]
    fn test_first_vowel_alone() {
        assert_eq!(filter("strings with the first vowel").contains_character, Some('a'));
    }

    #[test]
    fn test_empty_query_is_unparseable() {
        assert_eq!(translate(""), Err(TranslateError::Unparseable));
        assert_eq!(translate("   \t "), Err(TranslateError::Unparseable));
    }

    #[test]
    fn test_unrecognized_query_is_unparseable() {
        assert_eq!(translate("xyz"), Err(TranslateError::Unparseable));
        assert_eq!(
            translate("give me everything interesting"),
            Err(TranslateError::Unparseable)
        );
    }

    #[test]
    fn test_conflicting_bounds() {
        assert_eq!(
            translate("longer than 10 and shorter than 5"),
            Err(TranslateError::ConflictingFilters)
        );
    }

    #[test]
    fn test_compatible_bounds() {
        let f = filter("longer than 2 and shorter than 10");
        assert_eq!(f.min_length, Some(3));
        assert_eq!(f.max_length, Some(9));
    }

    #[test]
    fn test_rules_compose() {
        let f = filter("single word palindromes longer than 3 containing the letter b");
        assert_eq!(f.word_count, Some(1));
        assert_eq!(f.is_palindrome, Some(true));
        assert_eq!(f.min_length, Some(4));
        assert_eq!(f.contains_character, Some('b'));
    }

    #[test]
    fn test_translated_query_echoes_original_casing() {
        let t = translate("Show me Palindromes").unwrap();
        assert_eq!(t.original, "Show me Palindromes");
    }
}
