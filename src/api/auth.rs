use axum::http::{header, HeaderMap, StatusCode};

/// Extracts a bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Guards cron-only endpoints with the shared `x-cron-secret` header.
///
/// An unconfigured secret fails closed: the endpoint reports 503 instead of
/// letting any caller trigger result grading.
pub fn ensure_cron_authorized(
    headers: &HeaderMap,
    expected: Option<&str>,
) -> std::result::Result<(), (StatusCode, String)> {
    let Some(expected) = expected.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "cron secret is not configured".to_string(),
        ));
    };

    let presented = headers
        .get("x-cron-secret")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented != expected {
        return Err((
            StatusCode::UNAUTHORIZED,
            "invalid cron secret".to_string(),
        ));
    }

    Ok(())
}
