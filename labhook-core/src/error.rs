//! Error types for labhook.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Everything a dispatch call can fail with
//! - [`ListenerError`] - One listener's failure, with who produced it
//! - [`ListenerErrors`] - The ordered aggregate of one dispatch call
//! - [`UnknownEventKind`] - A spelling no [`EventKind`] answers to

use crate::{capability::Capability, kind::EventKind};
use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors a dispatch call can return.
///
/// Everything up to and including [`DispatchError::PayloadDecode`] is a
/// pipeline error: it is returned before any listener runs. The two aggregate
/// variants are returned after fan-out and carry every listener failure.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request used a method other than `POST`.
    #[error("invalid method {0}: webhooks must be delivered with POST")]
    InvalidMethod(String),

    /// A secret is configured and the request's token did not match it.
    #[error("webhook token authentication failed")]
    AuthenticationFailed,

    /// The event type header was absent or blank.
    #[error("missing X-Gitlab-Event header")]
    MissingEventHeader,

    /// The event type header names nothing GitLab is known to send.
    #[error("unsupported event kind: {0}")]
    UnsupportedEventKind(String),

    /// The event kind is known but the receiver did not subscribe to it.
    #[error("event kind {0} is not subscribed")]
    EventNotSubscribed(EventKind),

    /// The body could not be decoded into the kind's schema.
    #[error("failed to decode {kind} payload: {source}")]
    PayloadDecode {
        /// Kind whose schema was applied.
        kind: EventKind,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// One or more listeners failed; all matching listeners were invoked.
    #[error("{0}")]
    Listeners(ListenerErrors),

    /// Cancellation was observed between listener invocations.
    #[error("dispatch cancelled with {skipped} listener(s) not started; {failures}")]
    Cancelled {
        /// Listeners that were never started.
        skipped: usize,
        /// Failures collected before cancellation was observed.
        failures: ListenerErrors,
    },
}

impl DispatchError {
    /// Per-listener failures carried by either aggregate variant.
    ///
    /// Empty for pipeline errors.
    pub fn listener_errors(&self) -> &[ListenerError] {
        match self {
            Self::Listeners(errors) | Self::Cancelled { failures: errors, .. } => errors.as_slice(),
            _ => &[],
        }
    }

    /// Whether dispatch stopped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Whether the error came from the verify/classify/decode pipeline, in
    /// which case no listener was invoked.
    pub fn is_pipeline_error(&self) -> bool {
        !matches!(self, Self::Listeners(_) | Self::Cancelled { .. })
    }
}

/// A single listener's failure.
#[derive(Error, Debug)]
#[error("listener `{listener}` ({capability}) failed on {kind}: {source}")]
pub struct ListenerError {
    /// [`Listener::name`](crate::Listener::name) of the failing listener.
    pub listener: String,
    /// The capability it was invoked through.
    pub capability: Capability,
    /// The kind of the event being dispatched.
    pub kind: EventKind,
    /// What the listener returned.
    #[source]
    pub source: BoxError,
}

/// Every listener failure of one dispatch call, in invocation order.
#[derive(Debug, Default)]
pub struct ListenerErrors(Vec<ListenerError>);

impl ListenerErrors {
    /// An empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure.
    pub fn push(&mut self, error: ListenerError) {
        self.0.push(error);
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no listener failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The failures as a slice.
    pub fn as_slice(&self) -> &[ListenerError] {
        &self.0
    }

    /// Iterate over the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ListenerError> {
        self.0.iter()
    }

    /// Take the failures out.
    pub fn into_vec(self) -> Vec<ListenerError> {
        self.0
    }
}

impl fmt::Display for ListenerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            0 => f.write_str("no listener failed"),
            1 => write!(f, "1 listener failed: {}", self.0[0]),
            n => {
                write!(f, "{n} listeners failed")?;
                for error in &self.0 {
                    write!(f, "; {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<Vec<ListenerError>> for ListenerErrors {
    fn from(errors: Vec<ListenerError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ListenerErrors {
    type Item = ListenerError;
    type IntoIter = std::vec::IntoIter<ListenerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListenerErrors {
    type Item = &'a ListenerError;
    type IntoIter = std::slice::Iter<'a, ListenerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A spelling that does not name any [`EventKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);
