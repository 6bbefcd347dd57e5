//! Structured filters
//!
//! A filter is a set of independently optional predicates over record
//! properties. A record matches iff every present predicate is satisfied
//! (logical AND); the empty filter matches every record.

use serde::{Deserialize, Serialize};

use crate::repository::AnalyzedString;

/// Optional predicates over an analyzed string.
///
/// `contains_character` is a single `char`, so the "exactly one character"
/// rule is enforced where untrusted input is parsed, not here. A filter with
/// `min_length > max_length` is vacuous (matches nothing), not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl StringFilter {
    /// True when no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Check whether a record satisfies every present predicate.
    pub fn matches(&self, record: &AnalyzedString) -> bool {
        let props = &record.properties;

        if let Some(expected) = self.is_palindrome {
            if props.is_palindrome != expected {
                return false;
            }
        }

        if let Some(min) = self.min_length {
            if (props.length as i64) < min {
                return false;
            }
        }

        if let Some(max) = self.max_length {
            if (props.length as i64) > max {
                return false;
            }
        }

        if let Some(count) = self.word_count {
            if props.word_count as i64 != count {
                return false;
            }
        }

        if let Some(ch) = self.contains_character {
            // Case-sensitive: the exact character must occur in the value.
            if props
                .character_frequency_map
                .get(&ch)
                .copied()
                .unwrap_or(0)
                == 0
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::AnalyzedString;

    fn record(value: &str) -> AnalyzedString {
        AnalyzedString::analyzed_now(value)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = StringFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("")));
        assert!(filter.matches(&record("anything at all")));
    }

    #[test]
    fn test_palindrome_filter() {
        let filter = StringFilter {
            is_palindrome: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&record("racecar")));
        assert!(!filter.matches(&record("rust")));

        let filter = StringFilter {
            is_palindrome: Some(false),
            ..Default::default()
        };
        assert!(!filter.matches(&record("racecar")));
        assert!(filter.matches(&record("rust")));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let filter = StringFilter {
            min_length: Some(4),
            max_length: Some(4),
            ..Default::default()
        };
        assert!(filter.matches(&record("rust")));
        assert!(!filter.matches(&record("go")));
        assert!(!filter.matches(&record("kotlin")));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        // Vacuous filter, not an error: conflict detection is a translator
        // concern only.
        let filter = StringFilter {
            min_length: Some(5),
            max_length: Some(3),
            ..Default::default()
        };
        assert!(!filter.matches(&record("ab")));
        assert!(!filter.matches(&record("abcd")));
        assert!(!filter.matches(&record("abcdef")));
    }

    #[test]
    fn test_word_count_is_exact() {
        let filter = StringFilter {
            word_count: Some(2),
            ..Default::default()
        };
        assert!(filter.matches(&record("two words")));
        assert!(!filter.matches(&record("one")));
        assert!(!filter.matches(&record("now three words")));
    }

    #[test]
    fn test_contains_character_is_case_sensitive() {
        let filter = StringFilter {
            contains_character: Some('z'),
            ..Default::default()
        };
        assert!(filter.matches(&record("puzzle")));
        assert!(!filter.matches(&record("Zebra")));
        assert!(!filter.matches(&record("nothing here")));
    }

    #[test]
    fn test_all_predicates_are_anded() {
        let filter = StringFilter {
            is_palindrome: Some(true),
            word_count: Some(1),
            contains_character: Some('c'),
            ..Default::default()
        };
        assert!(filter.matches(&record("racecar")));
        // Palindrome and one word, but no 'c'
        assert!(!filter.matches(&record("noon")));
        // Contains 'c' and one word, but not a palindrome
        assert!(!filter.matches(&record("cargo")));
    }
}
