//! Stored record type
//!
//! The sole entity of the system. A record is immutable once created: the
//! only lifecycle operations are create, read and delete, all keyed by the
//! content digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::{self, AnalyzedProperties};

/// An analyzed string together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedString {
    /// Original input, byte-for-byte.
    pub value: String,
    /// Derived properties, including the digest that keys this record.
    pub properties: AnalyzedProperties,
    /// Set once at first successful insertion.
    pub created_at: DateTime<Utc>,
}

impl AnalyzedString {
    pub fn new(
        value: impl Into<String>,
        properties: AnalyzedProperties,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value: value.into(),
            properties,
            created_at,
        }
    }

    /// Analyze a value and stamp it with the current time.
    pub fn analyzed_now(value: &str) -> Self {
        Self::new(value, analyzer::analyze(value), Utc::now())
    }

    /// The content digest, which is also the storage key.
    pub fn digest(&self) -> &str {
        &self.properties.sha256_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_the_analyzer_digest() {
        let record = AnalyzedString::analyzed_now("hello");
        assert_eq!(record.digest(), analyzer::digest("hello"));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = AnalyzedString::analyzed_now("Madam, I'm Adam");
        let json = serde_json::to_string(&record).unwrap();
        let back: AnalyzedString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
