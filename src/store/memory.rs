use crate::auth::User;
use crate::domain::{DayLocks, HistoryEntry, Record};
use crate::error::Result;
use crate::store::StateStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    record: Record,
    history: Vec<HistoryEntry>,
    day_locks: Option<DayLocks>,
    users: Vec<User>,
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load_record(&self) -> Result<Record> {
        Ok(self.inner.read().await.record)
    }

    async fn save_record(&self, record: &Record) -> Result<()> {
        self.inner.write().await.record = *record;
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.inner.read().await.history.clone())
    }

    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()> {
        self.inner.write().await.history = history.to_vec();
        Ok(())
    }

    async fn load_day_locks(&self) -> Result<Option<DayLocks>> {
        Ok(self.inner.read().await.day_locks.clone())
    }

    async fn save_day_locks(&self, locks: &DayLocks) -> Result<()> {
        self.inner.write().await.day_locks = Some(locks.clone());
        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        self.inner.write().await.users = users.to_vec();
        Ok(())
    }
}
