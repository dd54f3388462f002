//! # Subscribers
//!
//! The per-capability entry point of a listener. A type that wants push events
//! implements `Subscriber<PushEvent>`; one that also wants comments implements
//! `Subscriber<NoteEvent>` as well, and so on.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Subscriber`] uses native `async fn` so implementations stay plain. The
//! registry stores listeners as trait objects, so the dispatcher calls through
//! [`DynSubscriber`], which every `Subscriber` implements automatically.

use crate::{context::DispatchContext, error::BoxError, payload::Payload};
use futures::future::BoxFuture;
use std::future::Future;

/// Receives events of one payload type.
///
/// The event is borrowed for the duration of the call only. Returning an error
/// does not stop delivery to other listeners; it is collected into the
/// dispatch call's aggregate error.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Subscriber<{E}>`",
    label = "missing `Subscriber` implementation",
    note = "A listener declaring a capability must implement `Subscriber` for that capability's payload `{E}`."
)]
pub trait Subscriber<E: Payload>: Send + Sync + 'static {
    /// Called once per dispatched event of this payload type.
    fn on_event(
        &self,
        ctx: &DispatchContext,
        event: &E,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Subscriber`].
pub trait DynSubscriber<E: Payload>: Send + Sync + 'static {
    /// Called once per dispatched event (dynamic dispatch version).
    fn on_event_dyn<'a>(
        &'a self,
        ctx: &'a DispatchContext,
        event: &'a E,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

// Blanket implementation: Any type implementing Subscriber implements DynSubscriber automatically.
impl<E: Payload, T: Subscriber<E>> DynSubscriber<E> for T {
    fn on_event_dyn<'a>(
        &'a self,
        ctx: &'a DispatchContext,
        event: &'a E,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.on_event(ctx, event))
    }
}
