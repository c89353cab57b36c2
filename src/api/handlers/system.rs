use axum::{extract::State, Json};

use crate::api::{state::AppState, types::HealthResponse};

/// GET / -- plain liveness string
pub async fn root() -> &'static str {
    "LockBox API is running"
}

/// GET /health -- liveness plus coarse content counters
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let picks = match state.store.load_day_locks().await {
        Ok(Some(locks)) => locks.featured.picks.len(),
        _ => 0,
    };
    let games = state
        .cache
        .cached_count(state.config.odds.default_sport)
        .await;

    Json(HealthResponse {
        ok: true,
        picks,
        games,
    })
}
