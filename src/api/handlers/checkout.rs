use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::api::{state::AppState, types::CheckoutResponse};

/// POST /api/create-checkout-session -- start a hosted subscription checkout
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> std::result::Result<Json<CheckoutResponse>, (StatusCode, String)> {
    let Some(checkout) = state.checkout.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "payment provider not configured".to_string(),
        ));
    };

    let base = state.config.server.frontend_url.trim_end_matches('/');
    let success_url = format!("{base}/success");
    let cancel_url = format!("{base}/cancel");

    match checkout
        .create_subscription_session(&success_url, &cancel_url)
        .await
    {
        Ok(url) => Ok(Json(CheckoutResponse { url })),
        Err(e) => {
            warn!("checkout session failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
