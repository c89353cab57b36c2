use crate::domain::{Game, HistoryEntry, PickResult, Record, Sport};
use crate::engine::resolve_results;
use crate::error::Result;
use crate::services::odds::OddsSource;
use crate::store::StateStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Outcome of a results refresh pass
#[derive(Debug, Clone, Copy)]
pub struct RefreshSummary {
    pub resolved: usize,
    pub record: Record,
}

/// Score lookups, the running record, and grading of past featured picks
pub struct ResultsService {
    source: Arc<dyn OddsSource>,
    store: Arc<dyn StateStore>,
    write_lock: Arc<Mutex<()>>,
    days_from: u8,
}

impl ResultsService {
    pub fn new(
        source: Arc<dyn OddsSource>,
        store: Arc<dyn StateStore>,
        write_lock: Arc<Mutex<()>>,
        days_from: u8,
    ) -> Self {
        Self {
            source,
            store,
            write_lock,
            days_from,
        }
    }

    pub async fn recent_scores(&self, sport: Sport) -> Result<Vec<Game>> {
        self.source.fetch_scores(sport, self.days_from).await
    }

    pub async fn record(&self) -> Result<Record> {
        self.store.load_record().await
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.store.load_history().await
    }

    /// Manually count a win or loss against the record
    pub async fn apply_manual_result(&self, result: PickResult) -> Result<Record> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.store.load_record().await?;
        record.apply(result);
        self.store.save_record(&record).await?;
        Ok(record)
    }

    /// Grade unchecked history entries against recent final scores.
    /// Skips the upstream call entirely when nothing is pending.
    pub async fn refresh_results(&self, sport: Sport) -> Result<RefreshSummary> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.store.load_history().await?;
        if history.iter().all(|e| e.checked) {
            return Ok(RefreshSummary {
                resolved: 0,
                record: self.store.load_record().await?,
            });
        }

        let scores = self.source.fetch_scores(sport, self.days_from).await?;
        let mut record = self.store.load_record().await?;
        let resolved = resolve_results(&mut history, &mut record, &scores);

        if resolved > 0 {
            self.store.save_history(&history).await?;
            self.store.save_record(&record).await?;
            info!("resolved {resolved} featured picks, record now {}-{}", record.wins, record.losses);
        }

        Ok(RefreshSummary { resolved, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeaturedSelection, MarketKind, Pick, PropPick, TeamScore};
    use crate::services::odds::MockOddsSource;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn locked_history() -> Vec<HistoryEntry> {
        vec![HistoryEntry {
            id: Uuid::new_v4(),
            date: "2025-11-02".to_string(),
            featured: FeaturedSelection {
                moneyline_lock: Some(Pick {
                    market: MarketKind::Moneyline,
                    sport: Sport::NFL,
                    game: "Green Bay Packers @ Chicago Bears".to_string(),
                    home_team: "Chicago Bears".to_string(),
                    away_team: "Green Bay Packers".to_string(),
                    pick: "Chicago Bears".to_string(),
                    confidence: 67,
                    price: -150.0,
                    point: None,
                    implied_probability: 0.6,
                    commence_time: Utc::now(),
                }),
                spread_lock: None,
                prop_lock: PropPick::sentinel(),
                picks: Vec::new(),
                generated_at: Utc::now(),
            },
            checked: false,
            result: None,
        }]
    }

    fn final_game() -> Game {
        Game {
            id: "g1".to_string(),
            sport_key: "americanfootball_nfl".to_string(),
            commence_time: Utc::now(),
            home_team: "Chicago Bears".to_string(),
            away_team: "Green Bay Packers".to_string(),
            completed: true,
            bookmakers: Vec::new(),
            scores: Some(vec![
                TeamScore {
                    name: "Chicago Bears".to_string(),
                    score: Some("24".to_string()),
                },
                TeamScore {
                    name: "Green Bay Packers".to_string(),
                    score: Some("17".to_string()),
                },
            ]),
        }
    }

    #[tokio::test]
    async fn refresh_grades_pending_entries() {
        let mut source = MockOddsSource::new();
        source
            .expect_fetch_scores()
            .times(1)
            .returning(|_, _| Ok(vec![final_game()]));

        let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
        store.save_history(&locked_history()).await.unwrap();

        let service = ResultsService::new(
            Arc::new(source),
            store.clone(),
            Arc::new(Mutex::new(())),
            3,
        );

        let summary = service.refresh_results(Sport::NFL).await.unwrap();
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.record.wins, 1);

        // everything checked now, so the next pass never calls upstream
        let summary = service.refresh_results(Sport::NFL).await.unwrap();
        assert_eq!(summary.resolved, 0);
        assert_eq!(summary.record.wins, 1);
    }

    #[tokio::test]
    async fn manual_result_updates_the_record() {
        let source = MockOddsSource::new();
        let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
        let service = ResultsService::new(
            Arc::new(source),
            store.clone(),
            Arc::new(Mutex::new(())),
            3,
        );

        let record = service.apply_manual_result(PickResult::Loss).await.unwrap();
        assert_eq!(record.losses, 1);
        assert_eq!(store.load_record().await.unwrap().losses, 1);
    }
}
