//! Service layer
//!
//! Orchestrates the analyzer, repository and query engine behind the five
//! logical operations: create, get, list, list-by-natural-language, delete.
//! Lookups and deletes always recompute the digest of the candidate value;
//! nothing is ever located by free-text match on the stored value.

use chrono::Utc;
use thiserror::Error;

use crate::analyzer;
use crate::observability::Logger;
use crate::query::{self, StringFilter, TranslatedQuery};
use crate::repository::{AnalyzedString, InsertOutcome, RepositoryError, StringRepository};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors
///
/// Every failure is a deterministic function of the input, so none of these
/// warrant a retry. Transport-level mapping lives in the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Create on a value whose digest is already stored
    #[error("String already exists in the system")]
    AlreadyExists,

    /// Get or delete on a value whose digest is not stored
    #[error("String does not exist in the system")]
    NotFound,

    /// Natural-language query matched no heuristic rule or was empty
    #[error("Unable to parse natural language query")]
    Unparseable,

    /// Natural-language translation produced `min_length > max_length`
    #[error("Query parsed but resulted in conflicting filters")]
    ConflictingFilters,

    /// Repository failure (I/O, corruption, poisoned lock)
    #[error("repository failure: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<query::TranslateError> for ServiceError {
    fn from(err: query::TranslateError) -> Self {
        match err {
            query::TranslateError::Unparseable => ServiceError::Unparseable,
            query::TranslateError::ConflictingFilters => ServiceError::ConflictingFilters,
        }
    }
}

/// The core engine behind the HTTP surface.
pub struct StringService<R: StringRepository> {
    repository: R,
}

impl<R: StringRepository> StringService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Analyze a value and store it, unless its digest is already present.
    pub fn create(&self, value: &str) -> ServiceResult<AnalyzedString> {
        let record = AnalyzedString::new(value, analyzer::analyze(value), Utc::now());

        match self.repository.insert_if_absent(record.clone())? {
            InsertOutcome::Created => {
                Logger::info("string_created", &[("digest", record.digest())]);
                Ok(record)
            }
            InsertOutcome::AlreadyExists => Err(ServiceError::AlreadyExists),
        }
    }

    /// Look up a value by its recomputed digest.
    pub fn get(&self, value: &str) -> ServiceResult<AnalyzedString> {
        let digest = analyzer::digest(value);
        self.repository.get(&digest)?.ok_or(ServiceError::NotFound)
    }

    /// Return all records matching a structured filter.
    pub fn list(&self, filter: &StringFilter) -> ServiceResult<Vec<AnalyzedString>> {
        Ok(self.repository.scan(filter)?)
    }

    /// Translate a free-text query and return the matching records together
    /// with the interpretation that was applied.
    pub fn list_by_natural_language(
        &self,
        query: &str,
    ) -> ServiceResult<(Vec<AnalyzedString>, TranslatedQuery)> {
        let translated = query::translate(query)?;
        let records = self.repository.scan(&translated.filter)?;
        Ok((records, translated))
    }

    /// Delete a value by its recomputed digest.
    pub fn delete(&self, value: &str) -> ServiceResult<()> {
        let digest = analyzer::digest(value);
        if self.repository.delete(&digest)? {
            Logger::info("string_deleted", &[("digest", digest.as_str())]);
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
