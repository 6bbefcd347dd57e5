//! Query parameter parsing
//!
//! Parses the `GET /strings` query parameters into a [`StringFilter`].
//! Parsing is strict: booleans must be literal `true`/`false`, numeric
//! bounds must be non-negative integers, and `contains_character` must be
//! exactly one character. Unknown parameters are ignored.

use std::collections::HashMap;

use crate::query::StringFilter;

use super::errors::{ApiError, ApiResult};

/// Parse the filter from raw query parameters.
pub fn parse_filter(params: &HashMap<String, String>) -> ApiResult<StringFilter> {
    let mut filter = StringFilter::default();

    for (key, value) in params {
        match key.as_str() {
            "is_palindrome" => filter.is_palindrome = Some(parse_bool(key, value)?),
            "min_length" => filter.min_length = Some(parse_bound(key, value)?),
            "max_length" => filter.max_length = Some(parse_bound(key, value)?),
            "word_count" => filter.word_count = Some(parse_bound(key, value)?),
            "contains_character" => {
                filter.contains_character = Some(parse_single_char(key, value)?)
            }
            _ => {}
        }
    }

    Ok(filter)
}

fn parse_bool(key: &str, value: &str) -> ApiResult<bool> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::InvalidQueryParam(format!(
            "{} must be true or false",
            key
        ))),
    }
}

/// Numeric filter values must be non-negative integers. The filter type
/// itself tolerates negative bounds (the translator can produce them), but
/// they are rejected at this boundary.
fn parse_bound(key: &str, value: &str) -> ApiResult<i64> {
    let parsed: i64 = value.parse().map_err(|_| {
        ApiError::InvalidQueryParam(format!("{} must be a non-negative integer", key))
    })?;
    if parsed < 0 {
        return Err(ApiError::InvalidQueryParam(format!(
            "{} must be a non-negative integer",
            key
        )));
    }
    Ok(parsed)
}

fn parse_single_char(key: &str, value: &str) -> ApiResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ApiError::InvalidQueryParam(format!(
            "{} must be a single character",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_give_empty_filter() {
        let filter = parse_filter(&params(&[])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_full_filter() {
        let filter = parse_filter(&params(&[
            ("is_palindrome", "true"),
            ("min_length", "2"),
            ("max_length", "10"),
            ("word_count", "1"),
            ("contains_character", "z"),
        ]))
        .unwrap();

        assert_eq!(filter.is_palindrome, Some(true));
        assert_eq!(filter.min_length, Some(2));
        assert_eq!(filter.max_length, Some(10));
        assert_eq!(filter.word_count, Some(1));
        assert_eq!(filter.contains_character, Some('z'));
    }

    #[test]
    fn test_bool_is_strict() {
        assert!(parse_filter(&params(&[("is_palindrome", "yes")])).is_err());
        assert!(parse_filter(&params(&[("is_palindrome", "1")])).is_err());
        // Case-insensitive literals are accepted
        let filter = parse_filter(&params(&[("is_palindrome", "True")])).unwrap();
        assert_eq!(filter.is_palindrome, Some(true));
    }

    #[test]
    fn test_negative_bound_rejected() {
        assert!(parse_filter(&params(&[("min_length", "-1")])).is_err());
        assert!(parse_filter(&params(&[("word_count", "-3")])).is_err());
    }

    #[test]
    fn test_non_numeric_bound_rejected() {
        assert!(parse_filter(&params(&[("max_length", "abc")])).is_err());
        assert!(parse_filter(&params(&[("max_length", "3.5")])).is_err());
    }

    #[test]
    fn test_contains_character_must_be_single() {
        assert!(parse_filter(&params(&[("contains_character", "")])).is_err());
        assert!(parse_filter(&params(&[("contains_character", "ab")])).is_err());

        let filter = parse_filter(&params(&[("contains_character", "é")])).unwrap();
        assert_eq!(filter.contains_character, Some('é'));
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let filter = parse_filter(&params(&[("limit", "20"), ("sort", "asc")])).unwrap();
        assert!(filter.is_empty());
    }
}
