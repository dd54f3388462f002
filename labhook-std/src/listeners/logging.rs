//! Logging listener for event observation.

use labhook_core::{BoxError, DispatchContext, Payload, Subscriber};
use labhook_macros::Listener;
use tracing::{debug, info};

/// A listener that logs every event it sees.
///
/// Declares every capability. Register it first to get one log line per
/// delivery before any other listener runs.
#[derive(Debug, Clone, Copy, Default, Listener)]
#[listener(all, name = "logging", crate = "labhook_core")]
pub struct LoggingListener;

impl<E: Payload> Subscriber<E> for LoggingListener {
    async fn on_event(&self, ctx: &DispatchContext, event: &E) -> Result<(), BoxError> {
        let metadata = ctx.metadata();
        info!(
            capability = %E::CAPABILITY,
            event = metadata.event_header.as_deref(),
            delivery = metadata.event_uuid.as_deref(),
            instance = metadata.instance.as_deref(),
            "webhook event"
        );
        debug!(?event, "webhook payload");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhook_core::{Capabilities, Listener, event::PushEvent};

    #[tokio::test]
    async fn never_fails() {
        let ctx = DispatchContext::new();
        let result = Subscriber::<PushEvent>::on_event(&LoggingListener, &ctx, &PushEvent::default()).await;
        assert!(result.is_ok());
    }

    #[test]
    fn declares_everything() {
        assert_eq!(LoggingListener.capabilities(), Capabilities::all());
        assert_eq!(LoggingListener.name(), "logging");
    }
}
