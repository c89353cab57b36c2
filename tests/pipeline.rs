//! Persistence behavior across process restarts. Every test builds a
//! second service graph over the same data directory and checks that the
//! first instance's state survives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lockbox::api::AppState;
use lockbox::config::AppConfig;
use lockbox::domain::{
    BookmakerQuote, Game, MarketQuote, OutcomeQuote, PickResult, Sport, TeamContext, TeamScore,
};
use lockbox::error::Result;
use lockbox::services::{OddsSource, TeamContextProvider};
use lockbox::store::JsonStore;
use tempfile::TempDir;

struct FakeOddsSource {
    games: Vec<Game>,
    scores: Vec<Game>,
    odds_calls: AtomicUsize,
}

impl FakeOddsSource {
    fn new(games: Vec<Game>, scores: Vec<Game>) -> Self {
        Self {
            games,
            scores,
            odds_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl OddsSource for FakeOddsSource {
    async fn fetch_odds(&self, _sport: Sport) -> Result<Vec<Game>> {
        self.odds_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.games.clone())
    }

    async fn fetch_scores(&self, _sport: Sport, _days_from: u8) -> Result<Vec<Game>> {
        Ok(self.scores.clone())
    }

    async fn fetch_event_props(&self, _sport: Sport, _event_id: &str) -> Result<Game> {
        Err(lockbox::error::LockboxError::Upstream(
            "no prop odds".to_string(),
        ))
    }
}

struct NeutralContext;

#[async_trait]
impl TeamContextProvider for NeutralContext {
    async fn team_contexts(
        &self,
        _sport: Sport,
        teams: &[String],
    ) -> HashMap<String, TeamContext> {
        teams
            .iter()
            .map(|t| (t.clone(), TeamContext::default()))
            .collect()
    }
}

fn upcoming_game() -> Game {
    Game {
        id: "game-1".to_string(),
        sport_key: "americanfootball_nfl".to_string(),
        commence_time: Utc::now() + Duration::hours(6),
        home_team: "Chicago Bears".to_string(),
        away_team: "Green Bay Packers".to_string(),
        completed: false,
        bookmakers: vec![BookmakerQuote {
            key: "draftkings".to_string(),
            title: "DraftKings".to_string(),
            markets: vec![MarketQuote {
                key: "h2h".to_string(),
                outcomes: vec![
                    OutcomeQuote {
                        name: "Chicago Bears".to_string(),
                        price: -150.0,
                        point: None,
                        description: None,
                    },
                    OutcomeQuote {
                        name: "Green Bay Packers".to_string(),
                        price: 130.0,
                        point: None,
                        description: None,
                    },
                ],
            }],
        }],
        scores: None,
    }
}

fn final_game() -> Game {
    Game {
        id: "game-1".to_string(),
        sport_key: "americanfootball_nfl".to_string(),
        commence_time: Utc::now() - Duration::hours(4),
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

fn test_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.odds.api_key = "test-key".to_string();
    config
}

/// One "process": a service graph over a JSON store in `dir`.
fn boot(dir: &TempDir, source: Arc<FakeOddsSource>) -> AppState {
    AppState::new(
        test_config(),
        source,
        Arc::new(NeutralContext),
        Arc::new(JsonStore::new(dir.path())),
        None,
    )
}

#[tokio::test]
async fn day_locks_survive_restart() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let first_source = Arc::new(FakeOddsSource::new(vec![upcoming_game()], Vec::new()));
    let first = boot(&dir, first_source.clone());
    let locked = first
        .picks
        .featured(Sport::NFL)
        .await
        .expect("featured generation failed");
    assert_eq!(first_source.odds_calls.load(Ordering::SeqCst), 1);

    // A fresh instance replays the stored selection without refetching.
    let second_source = Arc::new(FakeOddsSource::new(vec![upcoming_game()], Vec::new()));
    let second = boot(&dir, second_source.clone());
    let replayed = second
        .picks
        .featured(Sport::NFL)
        .await
        .expect("featured replay failed");

    assert_eq!(replayed.generated_at, locked.generated_at);
    assert_eq!(
        replayed.moneyline_lock.as_ref().map(|p| p.pick.as_str()),
        Some("Chicago Bears")
    );
    assert_eq!(second_source.odds_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn graded_results_survive_restart() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let source = Arc::new(FakeOddsSource::new(vec![upcoming_game()], vec![final_game()]));
    let first = boot(&dir, source);
    first
        .picks
        .featured(Sport::NFL)
        .await
        .expect("featured generation failed");

    let summary = first
        .results
        .refresh_results(Sport::NFL)
        .await
        .expect("refresh failed");
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.record.wins, 1);

    // Restart: record and graded history are read back from disk.
    let second = boot(
        &dir,
        Arc::new(FakeOddsSource::new(Vec::new(), vec![final_game()])),
    );
    let record = second.results.record().await.expect("record load failed");
    assert_eq!(record.wins, 1);
    assert_eq!(record.losses, 0);

    let history = second.results.history().await.expect("history load failed");
    assert_eq!(history.len(), 1);
    assert!(history[0].checked);
    assert_eq!(history[0].result, Some(PickResult::Win));

    // Everything is already graded, so a second pass resolves nothing.
    let summary = second
        .results
        .refresh_results(Sport::NFL)
        .await
        .expect("refresh failed");
    assert_eq!(summary.resolved, 0);
    assert_eq!(summary.record.wins, 1);
}

#[tokio::test]
async fn manual_results_persist_across_instances() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let first = boot(&dir, Arc::new(FakeOddsSource::new(Vec::new(), Vec::new())));
    let record = first
        .results
        .apply_manual_result(PickResult::Win)
        .await
        .expect("manual result failed");
    assert_eq!(record.wins, 1);

    let second = boot(&dir, Arc::new(FakeOddsSource::new(Vec::new(), Vec::new())));
    let record = second
        .results
        .apply_manual_result(PickResult::Loss)
        .await
        .expect("manual result failed");
    assert_eq!(record.wins, 1);
    assert_eq!(record.losses, 1);
    assert!((record.win_rate() - 0.5).abs() < 1e-9);
}
