//! # Dispatcher
//!
//! Runs the pipeline for one delivery:
//!
//! 1. method check (`POST` only)
//! 2. [`verify_token`](crate::verify::verify_token) against `X-Gitlab-Token`
//! 3. [`classify`] against `X-Gitlab-Event`
//! 4. [`decode`] the body
//! 5. fan-out to every listener declaring the event's capability
//!
//! Steps 1 to 4 fail fast and no listener runs. Step 5 never stops early on a
//! listener error: every matching listener is invoked, sequentially and in
//! registration order, and every failure is returned together.
//!
//! Cancellation is checked between listener invocations only. Once observed,
//! the remaining listeners are skipped and [`DispatchError::Cancelled`] carries
//! the failures collected so far.

use crate::{
    classify::{Subscriptions, classify},
    decode::decode,
    headers::{self, request_metadata},
    registry::{ListenerRegistry, RegistryBuilder},
    verify::SecretToken,
};
use http::{HeaderValue, Method, Request, request::Parts};
use labhook_core::{
    DispatchContext, DispatchError, Event, EventKind, Listener, ListenerError, ListenerErrors,
    Payload,
};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};

/// Verifies, classifies, decodes and fans out webhook deliveries.
///
/// Immutable once built; share it behind an `Arc` across request handlers.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    secret: SecretToken,
    subscriptions: Subscriptions,
    registry: ListenerRegistry,
}

impl Dispatcher {
    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// The kinds this dispatcher accepts.
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// The registered listeners.
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Run the whole pipeline on one request.
    ///
    /// The request's delivery headers are attached to `ctx` as
    /// [`RequestMetadata`](labhook_core::RequestMetadata). The body is not
    /// touched unless the method, token and event header are all accepted.
    pub async fn dispatch_request<B>(
        &self,
        request: Request<B>,
        ctx: DispatchContext,
    ) -> Result<(), DispatchError>
    where
        B: AsRef<[u8]>,
    {
        let (parts, body) = request.into_parts();
        let kind = self.authorize(&parts)?;
        let ctx = ctx.with_metadata(request_metadata(&parts.headers));
        self.deliver(kind, body.as_ref(), &ctx).await
    }

    /// Check method, token and event header. Only the request head is read.
    pub fn authorize(&self, parts: &Parts) -> Result<EventKind, DispatchError> {
        if parts.method != Method::POST {
            warn!(method = %parts.method, "rejected webhook: method not allowed");
            return Err(DispatchError::InvalidMethod(parts.method.to_string()));
        }

        let event_header = parts
            .headers
            .get(&headers::EVENT)
            .map(|value| String::from_utf8_lossy(value.as_bytes()));
        let event_header = event_header.as_deref();

        let token = parts.headers.get(&headers::TOKEN).map(HeaderValue::as_bytes);
        if let Err(error) = self.secret.verify(token) {
            warn!(event = event_header, "rejected webhook: token mismatch");
            return Err(error);
        }

        classify(event_header, &self.subscriptions).inspect_err(|error| {
            warn!(event = event_header, %error, "rejected webhook");
        })
    }

    /// Decode `body` as `kind` and fan it out.
    pub async fn deliver(
        &self,
        kind: EventKind,
        body: &[u8],
        ctx: &DispatchContext,
    ) -> Result<(), DispatchError> {
        let event = decode(kind, body).inspect_err(|error| {
            warn!(%kind, %error, "rejected webhook: undecodable payload");
        })?;
        self.dispatch_event(&event, ctx).await
    }

    /// Fan an already decoded event out to its listeners.
    pub async fn dispatch_event(
        &self,
        event: &Event,
        ctx: &DispatchContext,
    ) -> Result<(), DispatchError> {
        let kind = event.kind();
        match event {
            Event::Push(e) => self.notify(kind, e, ctx).await,
            Event::TagPush(e) => self.notify(kind, e, ctx).await,
            Event::Issue(e) | Event::ConfidentialIssue(e) => self.notify(kind, e, ctx).await,
            Event::Note(e) | Event::ConfidentialNote(e) => self.notify(kind, e, ctx).await,
            Event::MergeRequest(e) => self.notify(kind, e, ctx).await,
            Event::WikiPage(e) => self.notify(kind, e, ctx).await,
            Event::Pipeline(e) => self.notify(kind, e, ctx).await,
            Event::Job(e) => self.notify(kind, e, ctx).await,
            Event::Deployment(e) => self.notify(kind, e, ctx).await,
            Event::Release(e) => self.notify(kind, e, ctx).await,
            Event::Subgroup(e) => self.notify(kind, e, ctx).await,
            Event::FeatureFlag(e) => self.notify(kind, e, ctx).await,
            Event::Member(e) => self.notify(kind, e, ctx).await,
            Event::Emoji(e) => self.notify(kind, e, ctx).await,
            Event::ResourceAccessToken(e) => self.notify(kind, e, ctx).await,
        }
    }

    async fn notify<E: Payload>(
        &self,
        kind: EventKind,
        event: &E,
        ctx: &DispatchContext,
    ) -> Result<(), DispatchError> {
        let capability = E::CAPABILITY;
        let listeners = self.registry.listeners_for(capability);
        let mut failures = ListenerErrors::new();
        let mut invoked = 0usize;

        for (index, listener) in listeners.iter().enumerate() {
            if ctx.is_cancelled() {
                let skipped = listeners.len() - index;
                warn!(%kind, skipped, failed = failures.len(), "dispatch cancelled");
                return Err(DispatchError::Cancelled { skipped, failures });
            }

            // The registry only indexes listeners under capabilities they declare.
            let Some(subscriber) = E::subscriber(listener.as_ref()) else {
                continue;
            };

            let span = info_span!(
                "listener",
                listener = listener.name(),
                capability = %capability,
                kind = %kind,
            );
            invoked += 1;
            let result = subscriber
                .on_event_dyn(ctx, event)
                .instrument(span.clone())
                .await;

            if let Err(source) = result {
                span.in_scope(|| warn!(error = %source, "listener failed"));
                failures.push(ListenerError {
                    listener: listener.name().to_owned(),
                    capability,
                    kind,
                    source,
                });
            }
        }

        info!(%kind, invoked, failed = failures.len(), "dispatch complete");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Listeners(failures))
        }
    }
}

/// Builder for constructing a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    secret: SecretToken,
    subscriptions: Subscriptions,
    registry: RegistryBuilder,
}

impl DispatcherBuilder {
    /// Require `X-Gitlab-Token` to equal `secret`. An empty secret disables
    /// verification.
    pub fn secret(mut self, secret: impl Into<SecretToken>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Accept `kind`.
    pub fn subscribe(mut self, kind: EventKind) -> Self {
        self.subscriptions.insert(kind);
        self
    }

    /// Accept every kind in `kinds`.
    pub fn subscriptions(mut self, kinds: impl IntoIterator<Item = EventKind>) -> Self {
        self.subscriptions.extend(kinds);
        self
    }

    /// Register a listener.
    pub fn register<L: Listener>(mut self, listener: L) -> Self {
        self.registry = self.registry.register(listener);
        self
    }

    /// Register a listener that is shared elsewhere.
    pub fn register_arc(mut self, listener: Arc<dyn Listener>) -> Self {
        self.registry = self.registry.register_arc(listener);
        self
    }

    /// Register several listeners, in order.
    pub fn register_all(mut self, listeners: impl IntoIterator<Item = Arc<dyn Listener>>) -> Self {
        self.registry = self.registry.register_all(listeners);
        self
    }

    /// Append the listeners of a prebuilt registry.
    pub fn registry(mut self, registry: ListenerRegistry) -> Self {
        self.registry = self.registry.register_all(registry.listeners().iter().cloned());
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            secret: self.secret,
            subscriptions: self.subscriptions,
            registry: self.registry.build(),
        }
    }
}
