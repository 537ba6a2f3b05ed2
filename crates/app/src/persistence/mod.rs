//! Persistence collaborator.
//!
//! An optional extension point: the reference system keeps request data only
//! in memory, so the store works against [`Persistence`] as a narrow
//! interface rather than a built-in concern. [`JsonFilePersistence`] is the
//! bundled implementation, storing a single JSON document.

mod records;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bursar::{memos::Memo, requests::FundRequest};
use mockall::automock;
use thiserror::Error;
use tracing::debug;

pub use records::{MemoRecord, RecordError, RequestRecord, StoreDocument};

const STORE_FILE: &str = "store.json";

/// Errors crossing the persistence boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("storage error")]
    Io(#[source] io::Error),

    /// The stored document is not valid JSON.
    #[error("malformed store document")]
    Json(#[from] serde_json::Error),

    /// The stored document decodes but violates a lifecycle invariant.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Everything the store owns, in one load.
#[derive(Debug, Default)]
pub struct StoreSnapshot {
    /// All fund requests, in insertion order.
    pub requests: Vec<FundRequest>,

    /// All memos, in filing order.
    pub memos: Vec<Memo>,
}

/// Narrow interface to durable storage.
#[automock]
pub trait Persistence: Send + Sync {
    /// Load the full snapshot. An absent backing store yields an empty
    /// snapshot, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the backing store exists but
    /// cannot be read or decoded.
    fn load_all(&self) -> Result<StoreSnapshot, PersistenceError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the snapshot cannot be written.
    fn save_all(&self, requests: &[FundRequest], memos: &[Memo]) -> Result<(), PersistenceError>;
}

/// JSON-file-backed persistence.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Persistence rooted in the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORE_FILE),
        }
    }
}

impl Persistence for JsonFilePersistence {
    fn load_all(&self) -> Result<StoreSnapshot, PersistenceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store document; starting empty");

            return Ok(StoreSnapshot::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(PersistenceError::Io)?;
        let document: StoreDocument = serde_json::from_str(&contents)?;

        let requests = document
            .requests
            .into_iter()
            .map(FundRequest::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let memos = document.memos.into_iter().map(Memo::from).collect();

        Ok(StoreSnapshot { requests, memos })
    }

    fn save_all(&self, requests: &[FundRequest], memos: &[Memo]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(PersistenceError::Io)?;
        }

        let document = StoreDocument {
            requests: requests.iter().map(RequestRecord::from).collect(),
            memos: memos.iter().map(MemoRecord::from).collect(),
        };

        let json = serde_json::to_string_pretty(&document)?;

        // Write-then-rename so a failed write never truncates existing data.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(PersistenceError::Io)?;
        fs::rename(&staging, &self.path).map_err(PersistenceError::Io)?;

        debug!(path = %self.path.display(), "store document written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bursar::{
        fixtures::{demo_done_request, demo_requests, demo_users},
        memos::{Memo, MemoId},
        requests::Status,
    };
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn load_on_an_absent_file_is_an_empty_snapshot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let persistence = JsonFilePersistence::new(dir.path());

        let snapshot = persistence.load_all()?;

        assert!(snapshot.requests.is_empty());
        assert!(snapshot.memos.is_empty());

        Ok(())
    }

    #[test]
    fn round_trip_preserves_every_lifecycle_stage() -> TestResult {
        let dir = tempfile::tempdir()?;
        let persistence = JsonFilePersistence::new(dir.path());

        let directory = demo_users();
        let now = Timestamp::now();
        let mut requests = demo_requests(&directory.accountant, now);
        requests.push(demo_done_request(5, &directory.accountant, now));

        let released = requests
            .iter()
            .find(|request| request.status() == Status::Released)
            .ok_or("seed must contain a released request")?;

        let memos = vec![Memo::from_request(
            MemoId::new(1),
            released,
            None,
            &directory.accountant,
            now,
        )];

        persistence.save_all(&requests, &memos)?;
        let snapshot = persistence.load_all()?;

        assert_eq!(snapshot.requests, requests);
        assert_eq!(snapshot.memos, memos);

        Ok(())
    }

    #[test]
    fn save_overwrites_the_previous_snapshot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let persistence = JsonFilePersistence::new(dir.path());

        let directory = demo_users();
        let requests = demo_requests(&directory.accountant, Timestamp::now());

        persistence.save_all(&requests, &[])?;

        let shorter: Vec<_> = requests.iter().take(1).cloned().collect();
        persistence.save_all(&shorter, &[])?;

        let snapshot = persistence.load_all()?;
        assert_eq!(snapshot.requests.len(), 1);

        Ok(())
    }

    #[test]
    fn corrupt_document_is_a_typed_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let persistence = JsonFilePersistence::new(dir.path());

        std::fs::write(dir.path().join("store.json"), "{broken")?;

        let result = persistence.load_all();

        assert!(
            matches!(result, Err(PersistenceError::Json(_))),
            "expected Json error, got {result:?}"
        );

        Ok(())
    }
}
