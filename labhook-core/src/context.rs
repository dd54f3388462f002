//! Per-dispatch context handed to every listener.

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Request-scoped metadata copied from the inbound delivery's headers.
///
/// Every field is optional: GitLab versions differ in what they send, and
/// events can also be dispatched without an HTTP request at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    /// `X-Gitlab-Event` as received.
    pub event_header: Option<String>,
    /// `X-Gitlab-Event-UUID`: unique per delivery attempt.
    pub event_uuid: Option<String>,
    /// `X-Gitlab-Webhook-UUID`: identifies the configured webhook.
    pub webhook_uuid: Option<String>,
    /// `X-Gitlab-Instance`: base URL of the sending GitLab instance.
    pub instance: Option<String>,
    /// `Idempotency-Key`: stable across retries of the same delivery.
    pub idempotency_key: Option<String>,
    /// `User-Agent`, e.g. `GitLab/17.0.0`.
    pub user_agent: Option<String>,
}

/// Cancellation, deadline and metadata for one dispatch call.
///
/// Cancellation is advisory. The dispatcher checks [`is_cancelled`] between
/// listener invocations and stops starting new ones; a listener already
/// running is expected to watch [`cancellation`] itself and return promptly.
///
/// Cloning is cheap and clones share the cancellation token.
///
/// [`is_cancelled`]: DispatchContext::is_cancelled
/// [`cancellation`]: DispatchContext::cancellation
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
    metadata: RequestMetadata,
}

impl DispatchContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Treat the context as cancelled from `deadline` onwards.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Shorthand for a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attach request metadata.
    pub fn with_metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The token listeners can await (`ctx.cancellation().cancelled().await`).
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Signal cancellation to the dispatcher and to every listener sharing the token.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// True once the token is cancelled or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Metadata of the delivery being dispatched.
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_live() {
        let ctx = DispatchContext::new();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = DispatchContext::new();
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn external_token_drives_cancellation() {
        let token = CancellationToken::new();
        let ctx = DispatchContext::new().with_cancellation(token.child_token());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn past_deadline_counts_as_cancelled() {
        let ctx = DispatchContext::new().with_deadline(Instant::now());
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));

        let ctx = DispatchContext::new().with_timeout(Duration::from_secs(60));
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn listeners_can_await_cancellation() {
        let ctx = DispatchContext::new();
        let waiter = ctx.clone();
        ctx.cancel();
        waiter.cancellation().cancelled().await;
    }
}
