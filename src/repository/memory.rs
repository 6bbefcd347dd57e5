//! In-memory repository
//!
//! Backs the test suites and ephemeral serving. A single `RwLock` around the
//! digest map makes `insert_if_absent` a true test-and-set.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::query::StringFilter;

use super::errors::{RepositoryError, RepositoryResult};
use super::record::AnalyzedString;
use super::{InsertOutcome, StringRepository};

/// Volatile digest-keyed store.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<HashMap<String, AnalyzedString>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StringRepository for MemoryRepository {
    fn insert_if_absent(&self, record: AnalyzedString) -> RepositoryResult<InsertOutcome> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        match records.entry(record.digest().to_string()) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(InsertOutcome::Created)
            }
        }
    }

    fn get(&self, digest: &str) -> RepositoryResult<Option<AnalyzedString>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(digest).cloned())
    }

    fn delete(&self, digest: &str) -> RepositoryResult<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.remove(digest).is_some())
    }

    fn scan(&self, filter: &StringFilter) -> RepositoryResult<Vec<AnalyzedString>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}
