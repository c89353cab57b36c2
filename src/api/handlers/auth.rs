use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::api::auth::bearer_token;
use crate::api::{state::AppState, types::*};
use crate::error::LockboxError;

fn auth_error(err: LockboxError) -> (StatusCode, String) {
    match &err {
        LockboxError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        LockboxError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// POST /api/signup -- create an account and issue a token
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> std::result::Result<Json<AuthResponse>, (StatusCode, String)> {
    let (token, user) = state
        .auth
        .signup(&request.email, &request.password)
        .await
        .map_err(auth_error)?;
    Ok(Json(AuthResponse { token, user }))
}

/// POST /api/login -- verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> std::result::Result<Json<AuthResponse>, (StatusCode, String)> {
    let (token, user) = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(auth_error)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/me -- resolve the bearer token back to its account
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Json<MeResponse>, (StatusCode, String)> {
    let Some(token) = bearer_token(&headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            "missing bearer token".to_string(),
        ));
    };

    let user = state.auth.verify(token).await.map_err(auth_error)?;
    Ok(Json(MeResponse { user }))
}
