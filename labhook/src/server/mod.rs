//! Hosting layer: mounts a [`Dispatcher`] on an axum router.
//!
//! Status policy:
//!
//! | outcome | status |
//! |---|---|
//! | delivered | `204 No Content` |
//! | method other than `POST` | `405` |
//! | token mismatch | `401` |
//! | missing, unknown or unsubscribed event; undecodable body | `400` |
//! | body over the limit | `413` |
//! | one or more listeners failed | `500` |
//! | cancelled or past the deadline | `503` |
//!
//! Error responses carry `{"error": "<code>", "message": "..."}`.

mod config;
mod error;

pub use config::{ConfigError, DEFAULT_BODY_LIMIT, DEFAULT_PATH, ServerConfig};
pub use error::{WebhookError, WebhookErrorResponse};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::StatusCode,
    routing::any,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use labhook_core::DispatchContext;
use labhook_std::{dispatch::Dispatcher, headers::request_metadata};
use std::{sync::Arc, time::Duration};
use tracing::warn;

#[derive(Clone)]
struct WebhookState {
    dispatcher: Arc<Dispatcher>,
    body_limit: usize,
    deadline: Option<Duration>,
}

/// A router with one webhook route at `config.path`.
///
/// Every method is routed to the handler so that non-`POST` requests get the
/// webhook error body rather than axum's default.
pub fn router(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Router {
    let state = WebhookState {
        dispatcher,
        body_limit: config.body_limit,
        deadline: config.deadline(),
    };
    Router::new()
        .route(&config.path, any(handle_webhook))
        .with_state(state)
}

async fn handle_webhook(
    State(state): State<WebhookState>,
    request: Request,
) -> Result<StatusCode, WebhookError> {
    let (parts, body) = request.into_parts();
    let kind = state.dispatcher.authorize(&parts)?;
    let body = read_body(body, state.body_limit).await?;

    let mut ctx = DispatchContext::new().with_metadata(request_metadata(&parts.headers));
    if let Some(deadline) = state.deadline {
        ctx = ctx.with_timeout(deadline);
    }

    state.dispatcher.deliver(kind, &body, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, WebhookError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(error) if error.is::<LengthLimitError>() => {
            warn!(limit, "rejected webhook: body too large");
            Err(WebhookError::BodyTooLarge { limit })
        }
        Err(error) => Err(WebhookError::Body(error)),
    }
}
