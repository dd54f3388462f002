//! # labhook-std
//!
//! Standard machinery for the labhook GitLab webhook dispatcher.
//!
//! This crate provides:
//! - **Signature Verifier**: [`verify::verify_token`], [`verify::SecretToken`]
//! - **Event Classifier**: [`classify::classify`], [`classify::Subscriptions`]
//! - **Payload Decoder**: [`decode::decode`]
//! - **Listener Registry**: [`registry::ListenerRegistry`], [`registry::RegistryBuilder`]
//! - **Dispatcher**: [`dispatch::Dispatcher`], [`dispatch::DispatcherBuilder`]
//! - **Standard listeners**: [`listeners::LoggingListener`]
//! - **Test doubles**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use labhook_core;

pub mod classify;
pub mod decode;
pub mod dispatch;
pub mod headers;
pub mod listeners;
pub mod registry;
pub mod testing;
pub mod verify;
