use crate::domain::pick::FeaturedSelection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a resolved featured pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickResult {
    Win,
    Loss,
}

/// Running win/loss tally for featured moneyline locks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl Record {
    pub fn apply(&mut self, result: PickResult) {
        match result {
            PickResult::Win => self.wins += 1,
            PickResult::Loss => self.losses += 1,
        }
    }

    /// Win rate as a fraction, 0.0 before any result lands
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            self.wins as f64 / total as f64
        }
    }
}

/// One day's featured slate held for later grading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    /// UTC date, "YYYY-MM-DD"
    pub date: String,
    pub featured: FeaturedSelection,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PickResult>,
}
