//! GitLab webhook headers and request metadata extraction.

use http::{HeaderMap, HeaderName, header::USER_AGENT};
use labhook_core::RequestMetadata;

/// Event type: `Push Hook`, `Merge Request Hook`, ...
pub const EVENT: HeaderName = HeaderName::from_static("x-gitlab-event");
/// Shared secret configured on the webhook.
pub const TOKEN: HeaderName = HeaderName::from_static("x-gitlab-token");
/// Unique id of one delivery attempt.
pub const EVENT_UUID: HeaderName = HeaderName::from_static("x-gitlab-event-uuid");
/// Id of the configured webhook.
pub const WEBHOOK_UUID: HeaderName = HeaderName::from_static("x-gitlab-webhook-uuid");
/// Base URL of the sending instance.
pub const INSTANCE: HeaderName = HeaderName::from_static("x-gitlab-instance");
/// Retry-stable delivery key.
pub const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");

/// A header's value as text. Absent and non-ASCII values are both `None`.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Copy the delivery metadata headers into a [`RequestMetadata`].
///
/// The token header is never copied.
pub fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let owned = |name: &HeaderName| header_str(headers, name).map(str::to_owned);
    RequestMetadata {
        event_header: owned(&EVENT),
        event_uuid: owned(&EVENT_UUID),
        webhook_uuid: owned(&WEBHOOK_UUID),
        instance: owned(&INSTANCE),
        idempotency_key: owned(&IDEMPOTENCY_KEY),
        user_agent: owned(&USER_AGENT),
    }
}
