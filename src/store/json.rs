use crate::auth::User;
use crate::domain::{DayLocks, HistoryEntry, Record};
use crate::error::{LockboxError, Result};
use crate::store::StateStore;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

const RECORD_FILE: &str = "record.json";
const HISTORY_FILE: &str = "history.json";
const LOCKS_FILE: &str = "locks.json";
const USERS_FILE: &str = "users.json";

/// File-backed store, one pretty-printed JSON document per concern
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        JsonStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    async fn read_or<T: DeserializeOwned>(&self, file: &str, fallback: T) -> Result<T> {
        match tokio::fs::read_to_string(self.dir.join(file)).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(fallback),
            Err(e) => Err(LockboxError::Store(format!("reading {file}: {e}"))),
        }
    }

    async fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.dir.join(file), bytes)
            .await
            .map_err(|e| LockboxError::Store(format!("writing {file}: {e}")))
    }
}

#[async_trait]
impl StateStore for JsonStore {
    async fn load_record(&self) -> Result<Record> {
        self.read_or(RECORD_FILE, Record::default()).await
    }

    async fn save_record(&self, record: &Record) -> Result<()> {
        self.write(RECORD_FILE, record).await
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        self.read_or(HISTORY_FILE, Vec::new()).await
    }

    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()> {
        self.write(HISTORY_FILE, &history).await
    }

    async fn load_day_locks(&self) -> Result<Option<DayLocks>> {
        self.read_or(LOCKS_FILE, None).await
    }

    async fn save_day_locks(&self, locks: &DayLocks) -> Result<()> {
        self.write(LOCKS_FILE, locks).await
    }

    async fn load_users(&self) -> Result<Vec<User>> {
        self.read_or(USERS_FILE, Vec::new()).await
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        self.write(USERS_FILE, &users).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PickResult;

    #[tokio::test]
    async fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let record = store.load_record().await.unwrap();
        assert_eq!(record.wins, 0);
        assert!(store.load_history().await.unwrap().is_empty());
        assert!(store.load_day_locks().await.unwrap().is_none());
        assert!(store.load_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));

        let mut record = Record::default();
        record.apply(PickResult::Win);
        record.apply(PickResult::Loss);
        store.save_record(&record).await.unwrap();

        let loaded = store.load_record().await.unwrap();
        assert_eq!(loaded.wins, 1);
        assert_eq!(loaded.losses, 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_not_a_default() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(RECORD_FILE), b"not json")
            .await
            .unwrap();

        let store = JsonStore::new(dir.path());
        assert!(store.load_record().await.is_err());
    }
}
