use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserProfile;
use crate::domain::{Game, Pick, PickResult, PropPick, Record};

// ============================================================================
// Pick Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicksResponse {
    pub sport: String,
    pub picks: Vec<Pick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropsResponse {
    pub props: Vec<PropPick>,
}

// ============================================================================
// Score Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreGame {
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub completed: bool,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

impl ScoreGame {
    pub fn from_game(game: &Game) -> Self {
        Self {
            home_score: game.score_for(&game.home_team),
            away_score: game.score_for(&game.away_team),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            commence_time: game.commence_time,
            completed: game.completed,
        }
    }

    /// A game counts as live once it has kicked off but has no final yet.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.commence_time <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresResponse {
    pub total_games: usize,
    pub live_games: usize,
    pub games: Vec<ScoreGame>,
}

impl ScoresResponse {
    pub fn build(games: &[Game], now: DateTime<Utc>) -> Self {
        let games: Vec<ScoreGame> = games.iter().map(ScoreGame::from_game).collect();
        let live_games = games.iter().filter(|g| g.is_live(now)).count();
        Self {
            total_games: games.len(),
            live_games,
            games,
        }
    }
}

// ============================================================================
// Game Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub completed: bool,
    pub has_odds: bool,
}

impl GameSummary {
    pub fn from_game(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            commence_time: game.commence_time,
            completed: game.completed,
            has_odds: !game.bookmakers.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesResponse {
    pub sport: String,
    pub total_games: usize,
    pub games: Vec<GameSummary>,
}

// ============================================================================
// Record Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        // Percentage with one decimal, 0.0 when nothing has been graded.
        Self {
            wins: record.wins,
            losses: record.losses,
            win_rate: (record.win_rate() * 1000.0).round() / 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultRequest {
    pub result: PickResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub resolved: usize,
    pub record: RecordResponse,
}

// ============================================================================
// Auth Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

// ============================================================================
// Checkout Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

// ============================================================================
// Health Check Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub picks: usize,
    pub games: usize,
}
