//! # labhook-core
//!
//! Core contracts for the labhook GitLab webhook dispatcher.
//!
//! This crate has no I/O and is designed to be imported by crates that only
//! implement listeners and never host the receiving endpoint themselves.
//!
//! # Layers
//!
//! ## Wire identity ([`EventKind`])
//!
//! The closed set of event kinds GitLab can announce in the `X-Gitlab-Event`
//! header. Every kind knows its header spelling, its short identifier, and the
//! [`Capability`] that observes it.
//!
//! ## Typed payloads ([`Event`], [`Payload`])
//!
//! One decode schema per kind, collected in the [`event`] module. [`Event`] is
//! the tagged union the dispatcher hands around; [`Payload`] ties each schema to
//! the capability that receives it.
//!
//! ## Listeners ([`Subscriber`], [`Listener`])
//!
//! A [`Subscriber<E>`] receives one payload type. A [`Listener`] declares, per
//! capability, whether it is a subscriber for that capability's payload. The
//! declaration is explicit: returning `Some(self)` from an accessor only
//! compiles when the matching `Subscriber` is implemented.
//!
//! ## Context ([`DispatchContext`])
//!
//! Advisory cancellation, an optional deadline and request metadata threaded
//! into every listener call.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Everything a dispatch call can fail with
//! - [`ListenerError`] / [`ListenerErrors`] - Per-listener failures, aggregated
//! - [`BoxError`] - The error type listeners return

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod capability;
mod context;
mod error;
pub mod event;
mod kind;
mod listener;
mod payload;
mod subscriber;

// Re-exports
pub use capability::{Capabilities, Capability};
pub use context::{DispatchContext, RequestMetadata};
pub use error::{BoxError, DispatchError, ListenerError, ListenerErrors, UnknownEventKind};
pub use event::Event;
pub use kind::EventKind;
pub use listener::Listener;
pub use payload::Payload;
pub use subscriber::{DynSubscriber, Subscriber};
