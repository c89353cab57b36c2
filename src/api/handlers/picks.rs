use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::api::{state::AppState, types::*};
use crate::domain::{FeaturedSelection, Sport};

/// GET /api/picks -- scored picks for the configured default sport
pub async fn get_picks(State(state): State<AppState>) -> Response {
    let sport = state.config.odds.default_sport;
    picks_response(&state, sport).await
}

/// GET /api/picks/:sport -- scored picks for nfl/mlb/nhl/ncaaf
pub async fn get_picks_for_sport(
    State(state): State<AppState>,
    Path(sport): Path<String>,
) -> Response {
    match Sport::from_str(&sport) {
        Ok(sport) => picks_response(&state, sport).await,
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

// A failed pipeline answers 500 with an empty slate so clients always have
// a stable shape to render.
async fn picks_response(state: &AppState, sport: Sport) -> Response {
    match state.picks.picks(sport).await {
        Ok(picks) => Json(PicksResponse {
            sport: sport.as_str().to_string(),
            picks,
        })
        .into_response(),
        Err(e) => {
            warn!("pick generation failed for {}: {}", sport, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PicksResponse {
                    sport: sport.as_str().to_string(),
                    picks: Vec::new(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/featured -- today's locked selection, generated once per day
pub async fn get_featured(
    State(state): State<AppState>,
) -> std::result::Result<Json<FeaturedSelection>, (StatusCode, Json<FeaturedSelection>)> {
    let sport = state.config.odds.default_sport;
    match state.picks.featured(sport).await {
        Ok(featured) => Ok(Json(featured)),
        Err(e) => {
            warn!("featured selection failed for {}: {}", sport, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FeaturedSelection::empty()),
            ))
        }
    }
}

/// GET /api/props -- player-prop picks, empty on upstream failure
pub async fn get_props(State(state): State<AppState>) -> Json<PropsResponse> {
    let sport = state.config.odds.default_sport;
    let props = match state.picks.props(sport).await {
        Ok(props) => props,
        Err(e) => {
            warn!("prop generation failed for {}: {}", sport, e);
            Vec::new()
        }
    };
    Json(PropsResponse { props })
}
