use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_handler))
        // Pick endpoints
        .route("/api/picks", get(handlers::get_picks))
        .route("/api/picks/:sport", get(handlers::get_picks_for_sport))
        .route("/api/featured", get(handlers::get_featured))
        .route("/api/props", get(handlers::get_props))
        // Game endpoints
        .route("/api/scores", get(handlers::get_scores))
        .route("/api/games", get(handlers::get_games))
        // Record endpoints
        .route("/api/record", get(handlers::get_record))
        .route("/api/history", get(handlers::get_history))
        .route("/api/result", post(handlers::post_result))
        .route("/api/refresh-results", post(handlers::refresh_results))
        // Payment endpoints
        .route(
            "/api/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        // Auth endpoints
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/me", get(handlers::me))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
