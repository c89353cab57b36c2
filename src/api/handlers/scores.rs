use axum::{extract::State, Json};
use chrono::Utc;
use tracing::warn;

use crate::api::{state::AppState, types::*};

/// GET /api/scores -- recent and in-progress games with finals where known
pub async fn get_scores(State(state): State<AppState>) -> Json<ScoresResponse> {
    let sport = state.config.odds.default_sport;
    let games = match state.results.recent_scores(sport).await {
        Ok(games) => games,
        Err(e) => {
            warn!("score fetch failed for {}: {}", sport, e);
            Vec::new()
        }
    };
    Json(ScoresResponse::build(&games, Utc::now()))
}

/// GET /api/games -- games currently retained in the odds window
pub async fn get_games(State(state): State<AppState>) -> Json<GamesResponse> {
    let sport = state.config.odds.default_sport;
    let games = match state.cache.games(sport).await {
        Ok(games) => games,
        Err(e) => {
            warn!("game fetch failed for {}: {}", sport, e);
            Vec::new()
        }
    };
    Json(GamesResponse {
        sport: sport.as_str().to_string(),
        total_games: games.len(),
        games: games.iter().map(GameSummary::from_game).collect(),
    })
}
