//! Plain-text HTTP errors returned by the gateway

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// An error surfaced to the caller. Internal detail is logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or wrong token (401)
    Unauthorized,
    /// Malformed or missing input (400)
    BadRequest(&'static str),
    /// Nothing matched the request (404)
    NotFound(&'static str),
    /// The OS-level command failed (500)
    ActionFailed(&'static str),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::ActionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized => "Unauthorized",
            GatewayError::BadRequest(m)
            | GatewayError::NotFound(m)
            | GatewayError::ActionFailed(m) => *m,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.message();

        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer realm=\"devicectl\"")],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}
