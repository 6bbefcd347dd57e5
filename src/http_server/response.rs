//! Response envelopes
//!
//! Wire shapes for the string endpoints. Records are exposed with the digest
//! doubling as the identifier and the creation timestamp in RFC 3339.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::AnalyzedProperties;
use crate::query::{StringFilter, TranslatedQuery};
use crate::repository::AnalyzedString;

/// A single record as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct StringResponse {
    pub id: String,
    pub value: String,
    pub properties: AnalyzedProperties,
    pub created_at: DateTime<Utc>,
}

impl From<AnalyzedString> for StringResponse {
    fn from(record: AnalyzedString) -> Self {
        Self {
            id: record.properties.sha256_hash.clone(),
            value: record.value,
            properties: record.properties,
            created_at: record.created_at,
        }
    }
}

/// Response for `GET /strings`, echoing the filter that was applied.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<StringResponse>,
    pub count: usize,
    pub filters_applied: StringFilter,
}

impl ListResponse {
    pub fn new(records: Vec<AnalyzedString>, filters_applied: StringFilter) -> Self {
        let data: Vec<StringResponse> = records.into_iter().map(StringResponse::from).collect();
        let count = data.len();
        Self {
            data,
            count,
            filters_applied,
        }
    }
}

/// Response for `GET /strings/filter-by-natural-language`, echoing how the
/// query text was interpreted.
#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringResponse>,
    pub count: usize,
    pub interpreted_query: TranslatedQuery,
}

impl NaturalLanguageResponse {
    pub fn new(records: Vec<AnalyzedString>, interpreted_query: TranslatedQuery) -> Self {
        let data: Vec<StringResponse> = records.into_iter().map(StringResponse::from).collect();
        let count = data.len();
        Self {
            data,
            count,
            interpreted_query,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
