//! HTTP mapping of dispatch failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use labhook_core::DispatchError;
use serde::Serialize;
use thiserror::Error;

/// Everything the webhook handler can answer with besides `204 No Content`.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// A pipeline or listener failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge {
        /// The configured limit.
        limit: usize,
    },

    /// The body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[source] labhook_core::BoxError),
}

/// JSON response body for webhook errors.
#[derive(Serialize)]
pub struct WebhookErrorResponse {
    /// Error code identifier.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl WebhookError {
    /// Status code and error code for this failure.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Dispatch(error) => match error {
                DispatchError::InvalidMethod(_) => (StatusCode::METHOD_NOT_ALLOWED, "invalid_method"),
                DispatchError::AuthenticationFailed => {
                    (StatusCode::UNAUTHORIZED, "authentication_failed")
                }
                DispatchError::MissingEventHeader => (StatusCode::BAD_REQUEST, "missing_event_header"),
                DispatchError::UnsupportedEventKind(_) => {
                    (StatusCode::BAD_REQUEST, "unsupported_event_kind")
                }
                DispatchError::EventNotSubscribed(_) => (StatusCode::BAD_REQUEST, "event_not_subscribed"),
                DispatchError::PayloadDecode { .. } => (StatusCode::BAD_REQUEST, "payload_decode"),
                DispatchError::Listeners(_) => (StatusCode::INTERNAL_SERVER_ERROR, "listener_failed"),
                DispatchError::Cancelled { .. } => (StatusCode::SERVICE_UNAVAILABLE, "dispatch_cancelled"),
            },
            Self::BodyTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "body_too_large"),
            Self::Body(_) => (StatusCode::BAD_REQUEST, "unreadable_body"),
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        let body = WebhookErrorResponse {
            error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
