//! File-backed repository
//!
//! Append-only log of checksummed frames, replayed in full on open. Frame
//! layout:
//!
//! ```text
//! +----------------+
//! | Payload Length | (u32 LE)
//! +----------------+
//! | Payload        | (JSON: live record or tombstone)
//! +----------------+
//! | Checksum       | (u32 LE, CRC32 of the payload bytes)
//! +----------------+
//! ```
//!
//! Later frames win during replay, so a delete is an appended tombstone
//! rather than an in-place mutation. Every append is fsynced before the
//! operation is acknowledged. A truncated or checksum-failing frame aborts
//! the open; corruption is never skipped over.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::query::StringFilter;

use super::errors::{RepositoryError, RepositoryResult};
use super::record::AnalyzedString;
use super::{InsertOutcome, StringRepository};

/// Log file name under `<data_dir>/data/`.
const LOG_FILE: &str = "strings.log";

/// Upper bound on a single frame payload. A length prefix beyond this is
/// treated as corruption rather than an allocation request.
const MAX_PAYLOAD_BYTES: u32 = 16 * 1024 * 1024;

/// One log entry: either a live record or a tombstone for its digest.
#[derive(Debug, Serialize, Deserialize)]
struct LogFrame {
    digest: String,
    tombstone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<AnalyzedString>,
}

struct FileInner {
    file: File,
    index: HashMap<String, AnalyzedString>,
}

/// Durable digest-keyed store.
///
/// The whole live set is held in memory and the log is the source of truth
/// across restarts. A single mutex serializes mutations, which is what makes
/// `insert_if_absent` atomic per digest.
pub struct FileRepository {
    log_path: PathBuf,
    inner: Mutex<FileInner>,
}

impl FileRepository {
    /// Open or create the log under `<data_dir>/data/` and replay it.
    pub fn open(data_dir: &Path) -> RepositoryResult<Self> {
        let data_subdir = data_dir.join("data");
        fs::create_dir_all(&data_subdir).map_err(|e| {
            RepositoryError::io(
                format!("failed to create data directory {}", data_subdir.display()),
                e,
            )
        })?;

        let log_path = data_subdir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                RepositoryError::io(
                    format!("failed to open log file {}", log_path.display()),
                    e,
                )
            })?;

        let index = Self::replay(&log_path)?;

        Ok(Self {
            log_path,
            inner: Mutex::new(FileInner { file, index }),
        })
    }

    /// Path of the underlying log file.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Rebuild the live set by reading every frame in file order.
    fn replay(log_path: &Path) -> RepositoryResult<HashMap<String, AnalyzedString>> {
        let mut index = HashMap::new();

        let mut file = File::open(log_path)
            .map_err(|e| RepositoryError::io("failed to open log for replay", e))?;
        let len = file
            .metadata()
            .map_err(|e| RepositoryError::io("failed to read log metadata", e))?
            .len();

        let mut offset: u64 = 0;
        while offset < len {
            let (frame, frame_len) = Self::read_frame(&mut file, offset, len)?;

            if frame.tombstone {
                index.remove(&frame.digest);
            } else {
                let record = frame.record.ok_or_else(|| {
                    RepositoryError::corruption(offset, "live frame without a record")
                })?;
                index.insert(frame.digest, record);
            }

            offset += frame_len;
        }

        Ok(index)
    }

    /// Read one frame, returning it together with its on-disk size.
    fn read_frame(
        file: &mut File,
        offset: u64,
        total_len: u64,
    ) -> RepositoryResult<(LogFrame, u64)> {
        let remaining = total_len - offset;
        if remaining < 8 {
            return Err(RepositoryError::corruption(offset, "truncated frame header"));
        }

        let mut len_buf = [0u8; 4];
        file.read_exact(&mut len_buf)
            .map_err(|e| RepositoryError::io("failed to read frame length", e))?;
        let payload_len = u32::from_le_bytes(len_buf);

        if payload_len > MAX_PAYLOAD_BYTES || payload_len as u64 + 8 > remaining {
            return Err(RepositoryError::corruption(
                offset,
                format!("implausible frame length {}", payload_len),
            ));
        }

        let mut payload = vec![0u8; payload_len as usize];
        file.read_exact(&mut payload)
            .map_err(|e| RepositoryError::io("failed to read frame payload", e))?;

        let mut crc_buf = [0u8; 4];
        file.read_exact(&mut crc_buf)
            .map_err(|e| RepositoryError::io("failed to read frame checksum", e))?;
        let expected = u32::from_le_bytes(crc_buf);

        if crc32fast::hash(&payload) != expected {
            return Err(RepositoryError::corruption(offset, "checksum mismatch"));
        }

        let frame = serde_json::from_slice(&payload)?;
        Ok((frame, payload_len as u64 + 8))
    }

    /// Append a frame and fsync before returning.
    fn append_frame(inner: &mut FileInner, frame: &LogFrame) -> RepositoryResult<()> {
        let payload = serde_json::to_vec(frame)?;
        let checksum = crc32fast::hash(&payload);

        let mut buf = Vec::with_capacity(payload.len() + 8);
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&payload);
        buf.extend_from_slice(&checksum.to_le_bytes());

        inner
            .file
            .write_all(&buf)
            .map_err(|e| RepositoryError::io("failed to append frame", e))?;
        inner
            .file
            .sync_all()
            .map_err(|e| RepositoryError::io("failed to sync log", e))?;

        Ok(())
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, FileInner>> {
        self.inner.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl StringRepository for FileRepository {
    fn insert_if_absent(&self, record: AnalyzedString) -> RepositoryResult<InsertOutcome> {
        let mut inner = self.lock()?;

        let digest = record.digest().to_string();
        if inner.index.contains_key(&digest) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let frame = LogFrame {
            digest: digest.clone(),
            tombstone: false,
            record: Some(record.clone()),
        };
        Self::append_frame(&mut inner, &frame)?;
        inner.index.insert(digest, record);

        Ok(InsertOutcome::Created)
    }

    fn get(&self, digest: &str) -> RepositoryResult<Option<AnalyzedString>> {
        let inner = self.lock()?;
        Ok(inner.index.get(digest).cloned())
    }

    fn delete(&self, digest: &str) -> RepositoryResult<bool> {
        let mut inner = self.lock()?;

        if !inner.index.contains_key(digest) {
            return Ok(false);
        }

        let frame = LogFrame {
            digest: digest.to_string(),
            tombstone: true,
            record: None,
        };
        Self::append_frame(&mut inner, &frame)?;
        inner.index.remove(digest);

        Ok(true)
    }

    fn scan(&self, filter: &StringFilter) -> RepositoryResult<Vec<AnalyzedString>> {
        let inner = self.lock()?;
        Ok(inner
            .index
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_data_directory() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        assert!(repo.log_path().exists());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let record = AnalyzedString::analyzed_now("durable");
        let digest = record.digest().to_string();

        {
            let repo = FileRepository::open(dir.path()).unwrap();
            assert_eq!(
                repo.insert_if_absent(record.clone()).unwrap(),
                InsertOutcome::Created
            );
        }

        let repo = FileRepository::open(dir.path()).unwrap();
        assert_eq!(repo.get(&digest).unwrap(), Some(record));
    }

    #[test]
    fn test_tombstones_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let record = AnalyzedString::analyzed_now("short lived");
        let digest = record.digest().to_string();

        {
            let repo = FileRepository::open(dir.path()).unwrap();
            repo.insert_if_absent(record).unwrap();
            assert!(repo.delete(&digest).unwrap());
        }

        let repo = FileRepository::open(dir.path()).unwrap();
        assert_eq!(repo.get(&digest).unwrap(), None);
    }

    #[test]
    fn test_corrupted_frame_aborts_open() {
        let dir = TempDir::new().unwrap();
        let log_path;
        {
            let repo = FileRepository::open(dir.path()).unwrap();
            repo.insert_if_absent(AnalyzedString::analyzed_now("payload"))
                .unwrap();
            log_path = repo.log_path().to_path_buf();
        }

        let mut contents = fs::read(&log_path).unwrap();
        let mid = contents.len() / 2;
        contents[mid] ^= 0xFF;
        fs::write(&log_path, contents).unwrap();

        let result = FileRepository::open(dir.path());
        assert!(matches!(
            result,
            Err(RepositoryError::Corruption { .. }) | Err(RepositoryError::Encoding(_))
        ));
    }

    #[test]
    fn test_truncated_frame_aborts_open() {
        let dir = TempDir::new().unwrap();
        let log_path;
        {
            let repo = FileRepository::open(dir.path()).unwrap();
            repo.insert_if_absent(AnalyzedString::analyzed_now("payload"))
                .unwrap();
            log_path = repo.log_path().to_path_buf();
        }

        let contents = fs::read(&log_path).unwrap();
        fs::write(&log_path, &contents[..contents.len() - 3]).unwrap();

        let result = FileRepository::open(dir.path());
        assert!(matches!(result, Err(RepositoryError::Corruption { .. })));
    }

    #[test]
    fn test_insert_after_delete_creates_again() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        let record = AnalyzedString::analyzed_now("again");
        let digest = record.digest().to_string();

        repo.insert_if_absent(record.clone()).unwrap();
        repo.delete(&digest).unwrap();
        assert_eq!(
            repo.insert_if_absent(record).unwrap(),
            InsertOutcome::Created
        );
    }
}
