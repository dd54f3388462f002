//! # labhook - Typed GitLab Webhook Dispatch
//!
//! `labhook` receives GitLab webhook deliveries, checks the shared secret,
//! classifies the event from `X-Gitlab-Event`, decodes the body into a typed
//! payload and hands it to every listener that declared the matching
//! capability. Listener failures never stop delivery to the other listeners;
//! they are returned together.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use labhook::prelude::*;
//! use labhook::event::{NoteEvent, NoteTarget, PushEvent};
//!
//! #[derive(Listener)]
//! #[listener(push, comment, name = "notifier")]
//! struct Notifier;
//!
//! impl Subscriber<PushEvent> for Notifier {
//!     async fn on_event(&self, _ctx: &DispatchContext, push: &PushEvent) -> Result<(), BoxError> {
//!         println!("{} commits to {}", push.total_commits_count, push.git_ref);
//!         Ok(())
//!     }
//! }
//!
//! impl Subscriber<NoteEvent> for Notifier {
//!     async fn on_event(&self, _ctx: &DispatchContext, note: &NoteEvent) -> Result<(), BoxError> {
//!         if let NoteTarget::MergeRequest(Some(mr)) = note.target() {
//!             println!("comment on !{}", mr.iid);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .secret("s3cr3t")
//!     .subscribe(EventKind::Push)
//!     .subscribe(EventKind::Note)
//!     .register(LoggingListener)
//!     .register(Notifier)
//!     .build();
//!
//! dispatcher.dispatch_request(request, DispatchContext::new()).await?;
//! ```
//!
//! With the `server` feature, [`server::router`] mounts the dispatcher on an
//! axum router configured by [`server::ServerConfig`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use labhook_core::{
    // Errors
    BoxError,
    // Capabilities
    Capabilities,
    Capability,
    // Context
    DispatchContext,
    DispatchError,
    // Listener contracts
    DynSubscriber,
    // Events
    Event,
    EventKind,
    Listener,
    ListenerError,
    ListenerErrors,
    Payload,
    RequestMetadata,
    Subscriber,
    UnknownEventKind,
    event,
};

// Pipeline stages
pub use labhook_std::{
    classify::{Subscriptions, classify},
    decode::decode,
    dispatch::{Dispatcher, DispatcherBuilder},
    headers::request_metadata,
    registry::{ListenerRegistry, RegistryBuilder},
    verify::{SecretToken, verify_token},
};

/// GitLab header names.
pub mod headers {
    #![allow(clippy::wildcard_imports)]
    pub use labhook_std::headers::*;
}

/// Standard listener implementations.
pub mod listeners {
    #![allow(clippy::wildcard_imports)]
    pub use labhook_std::listeners::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use labhook_std::testing::*;
}

#[cfg(feature = "server")]
pub mod server;

/// Prelude module - common imports for labhook.
///
/// # Usage
///
/// ```rust,ignore
/// use labhook::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Capability, DispatchContext, DispatchError, Dispatcher, DynSubscriber, Event,
        EventKind, Listener, Subscriber, Subscriptions, listeners::LoggingListener,
    };
}

#[cfg(feature = "macros")]
pub use labhook_macros::Listener;
