use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use tracing::warn;

use crate::api::auth::ensure_cron_authorized;
use crate::api::{state::AppState, types::*};
use crate::domain::HistoryEntry;

/// GET /api/record -- cumulative graded record
pub async fn get_record(
    State(state): State<AppState>,
) -> std::result::Result<Json<RecordResponse>, (StatusCode, String)> {
    match state.results.record().await {
        Ok(record) => Ok(Json(RecordResponse::from(record))),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// GET /api/history -- past featured selections, newest first
pub async fn get_history(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<HistoryEntry>>, (StatusCode, String)> {
    match state.results.history().await {
        Ok(history) => Ok(Json(history)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// POST /api/result -- manually grade a win or loss
pub async fn post_result(
    State(state): State<AppState>,
    Json(request): Json<ResultRequest>,
) -> std::result::Result<Json<RecordResponse>, (StatusCode, String)> {
    match state.results.apply_manual_result(request.result).await {
        Ok(record) => Ok(Json(RecordResponse::from(record))),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// POST /api/refresh-results -- cron-guarded grading of pending locks
pub async fn refresh_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Json<RefreshResponse>, (StatusCode, String)> {
    ensure_cron_authorized(&headers, state.config.server.cron_secret.as_deref())?;

    let sport = state.config.odds.default_sport;
    match state.results.refresh_results(sport).await {
        Ok(summary) => Ok(Json(RefreshResponse {
            resolved: summary.resolved,
            record: RecordResponse::from(summary.record),
        })),
        Err(e) => {
            warn!("result refresh failed for {}: {}", sport, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
