//! Testing utilities for labhook.
//!
//! This module provides listeners that make dispatch behaviour observable.
//!
//! # Features
//!
//! - [`RecordingListener`]: Declares every capability and records what it receives
//! - [`CancellingListener`]: Cancels the dispatch context when invoked
//! - [`CallJournal`]: A call log shared by several listeners, for ordering assertions

use labhook_core::{BoxError, Capability, DispatchContext, Payload, Subscriber};
use labhook_macros::Listener;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Call Journal
// ============================================================================

/// Listener names in the order they were invoked.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener name.
    pub fn record(&self, listener: &str) {
        lock(&self.entries).push(listener.to_owned());
    }

    /// The names recorded so far.
    pub fn entries(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// One invocation seen by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Name of the listener that was invoked.
    pub listener: String,
    /// Capability it was invoked through.
    pub capability: Capability,
    /// The payload, re-encoded as JSON.
    pub payload: serde_json::Value,
    /// `X-Gitlab-Event-UUID` of the delivery, if known.
    pub event_uuid: Option<String>,
}

/// A listener that declares every capability and records what it receives.
///
/// Clones share the same record, so keep one clone for assertions and register
/// the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new("recorder");
/// let dispatcher = Dispatcher::builder()
///     .subscribe(EventKind::Push)
///     .register(recorder.clone())
///     .build();
///
/// dispatcher.dispatch_request(request, DispatchContext::new()).await?;
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone, Listener)]
#[listener(all, name_field = name, crate = "labhook_core")]
pub struct RecordingListener {
    name: String,
    calls: Arc<Mutex<Vec<Recorded>>>,
    journal: Option<CallJournal>,
    failure: Option<String>,
}

impl RecordingListener {
    /// Create a recording listener that always succeeds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Arc::default(),
            journal: None,
            failure: None,
        }
    }

    /// Fail every invocation with `message`, after recording it.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Also append this listener's name to `journal` on every invocation.
    pub fn with_journal(mut self, journal: &CallJournal) -> Self {
        self.journal = Some(journal.clone());
        self
    }

    /// Get a clone of the recorded invocations.
    pub fn calls(&self) -> Vec<Recorded> {
        lock(&self.calls).clone()
    }

    /// Get the number of recorded invocations.
    pub fn count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Invocations received through `capability`.
    pub fn calls_for(&self, capability: Capability) -> Vec<Recorded> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.capability == capability)
            .cloned()
            .collect()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl<E: Payload> Subscriber<E> for RecordingListener {
    async fn on_event(&self, ctx: &DispatchContext, event: &E) -> Result<(), BoxError> {
        let payload = serde_json::to_value(event)?;
        lock(&self.calls).push(Recorded {
            listener: self.name.clone(),
            capability: E::CAPABILITY,
            payload,
            event_uuid: ctx.metadata().event_uuid.clone(),
        });
        if let Some(journal) = &self.journal {
            journal.record(&self.name);
        }

        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Cancelling Listener
// ============================================================================

/// A listener that declares every capability and cancels the dispatch context
/// when invoked.
///
/// Useful for checking that later listeners are skipped.
#[derive(Clone, Listener)]
#[listener(all, name_field = name, crate = "labhook_core")]
pub struct CancellingListener {
    name: String,
    invocations: Arc<AtomicUsize>,
    journal: Option<CallJournal>,
}

impl CancellingListener {
    /// Create a new cancelling listener.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            invocations: Arc::default(),
            journal: None,
        }
    }

    /// Also append this listener's name to `journal` on every invocation.
    pub fn with_journal(mut self, journal: &CallJournal) -> Self {
        self.journal = Some(journal.clone());
        self
    }

    /// Get the number of invocations.
    pub fn count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl<E: Payload> Subscriber<E> for CancellingListener {
    async fn on_event(&self, ctx: &DispatchContext, _event: &E) -> Result<(), BoxError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if let Some(journal) = &self.journal {
            journal.record(&self.name);
        }
        ctx.cancel();
        Ok(())
    }
}
