//! Persistent application state
//!
//! All durable state lives behind [`StateStore`]: the win/loss record,
//! the featured-pick history, the current day's locked selection, and
//! registered users. The production backend writes JSON files; tests use
//! an in-memory store.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::auth::User;
use crate::domain::{DayLocks, HistoryEntry, Record};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load_record(&self) -> Result<Record>;
    async fn save_record(&self, record: &Record) -> Result<()>;

    async fn load_history(&self) -> Result<Vec<HistoryEntry>>;
    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()>;

    async fn load_day_locks(&self) -> Result<Option<DayLocks>>;
    async fn save_day_locks(&self, locks: &DayLocks) -> Result<()>;

    async fn load_users(&self) -> Result<Vec<User>>;
    async fn save_users(&self, users: &[User]) -> Result<()>;
}
