//! Bearer token authentication

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;
use tracing::warn;

use super::error::GatewayError;
use super::state::GatewayState;

/// Token presented in the `Authorization` header.
///
/// The `Bearer ` prefix is stripped when present; a bare value is taken as-is.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

/// Check the request headers against the configured token
pub fn authenticate(headers: &HeaderMap, expected: &str) -> bool {
    match bearer_token(headers) {
        Some(presented) if !expected.is_empty() => {
            presented.as_bytes().ct_eq(expected.as_bytes()).into()
        }
        _ => false,
    }
}

/// Middleware guarding every action route.
///
/// The config snapshot used for the check is stored in the request
/// extensions so the handler dispatches against the same config.
pub async fn require_token(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = state.config.snapshot().await;

    if !authenticate(request.headers(), config.token.expose_secret()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request with missing or invalid token"
        );
        return GatewayError::Unauthorized.into_response();
    }

    request.extensions_mut().insert(config);
    next.run(request).await
}
