//! Content-addressed record store
//!
//! Records are keyed by the SHA-256 digest of their value; there is no other
//! key and no update operation. The trait is the capability the service
//! layer is handed, so tests run against the in-memory implementation while
//! the server runs against the file-backed one.

pub mod errors;
pub mod file;
pub mod memory;
pub mod record;

pub use errors::{RepositoryError, RepositoryResult};
pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use record::AnalyzedString;

use crate::query::StringFilter;

/// Outcome of an insert-if-absent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored; this was the first insert of its digest.
    Created,
    /// A record with the same digest already exists; nothing was written.
    AlreadyExists,
}

/// A content-addressed store of analyzed strings.
///
/// `insert_if_absent` must be atomic per digest: two concurrent inserts of
/// the same value yield exactly one `Created` and one `AlreadyExists`.
/// Scan order is unspecified but stable within a single call.
pub trait StringRepository: Send + Sync {
    /// Store a record unless its digest is already present.
    fn insert_if_absent(&self, record: AnalyzedString) -> RepositoryResult<InsertOutcome>;

    /// Look up a record by digest.
    fn get(&self, digest: &str) -> RepositoryResult<Option<AnalyzedString>>;

    /// Remove a record by digest; returns whether anything was removed.
    fn delete(&self, digest: &str) -> RepositoryResult<bool>;

    /// Return every record matching the filter.
    fn scan(&self, filter: &StringFilter) -> RepositoryResult<Vec<AnalyzedString>>;
}
