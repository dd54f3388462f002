//! Receiver configuration.

use labhook_core::EventKind;
use labhook_std::{classify::Subscriptions, dispatch::DispatcherBuilder};
use serde::Deserialize;
use std::{fmt, num::ParseIntError, time::Duration};
use thiserror::Error;

/// Default mount path of the webhook route.
pub const DEFAULT_PATH: &str = "/webhook";

/// Default body limit: GitLab caps webhook payloads at 25 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Errors while loading a [`ServerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An event spelling no kind answers to.
    #[error("{var}: unknown event kind `{value}`")]
    UnknownEvent {
        /// Variable being read.
        var: &'static str,
        /// The offending entry.
        value: String,
    },

    /// A value that should be a non-negative integer.
    #[error("{var}: invalid number `{value}`: {source}")]
    InvalidNumber {
        /// Variable being read.
        var: &'static str,
        /// The offending value.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Configuration of the hosted webhook receiver.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Route the webhook is mounted on.
    pub path: String,
    /// Expected `X-Gitlab-Token`. `None` disables verification.
    pub secret: Option<String>,
    /// Accepted event kinds.
    pub events: Vec<EventKind>,
    /// Largest accepted body, in bytes.
    pub body_limit: usize,
    /// Dispatch deadline in milliseconds, applied to every delivery.
    pub deadline_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_owned(),
            secret: None,
            events: Vec::new(),
            body_limit: DEFAULT_BODY_LIMIT,
            deadline_ms: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("path", &self.path)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("events", &self.events)
            .field("body_limit", &self.body_limit)
            .field("deadline_ms", &self.deadline_ms)
            .finish()
    }
}

impl ServerConfig {
    /// Creates configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LABHOOK_PATH`: Route path (default: "/webhook")
    /// - `LABHOOK_SECRET`: Expected token; empty or unset disables verification
    /// - `LABHOOK_EVENTS`: Comma-separated event spellings, e.g. "Push Hook,note"
    /// - `LABHOOK_BODY_LIMIT`: Body limit in bytes (default: 25 MiB)
    /// - `LABHOOK_DEADLINE_MS`: Dispatch deadline in milliseconds (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("LABHOOK_PATH") {
            config.path = val;
        }
        if let Some(val) = lookup("LABHOOK_SECRET") {
            config.secret = Some(val).filter(|secret| !secret.is_empty());
        }
        if let Some(val) = lookup("LABHOOK_EVENTS") {
            config.events = parse_events("LABHOOK_EVENTS", &val)?;
        }
        if let Some(val) = lookup("LABHOOK_BODY_LIMIT") {
            config.body_limit = parse_number("LABHOOK_BODY_LIMIT", &val)?;
        }
        if let Some(val) = lookup("LABHOOK_DEADLINE_MS") {
            config.deadline_ms = Some(parse_number("LABHOOK_DEADLINE_MS", &val)?);
        }

        Ok(config)
    }

    /// The dispatch deadline, if configured.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// The accepted kinds as a [`Subscriptions`] set.
    pub fn subscriptions(&self) -> Subscriptions {
        self.events.iter().copied().collect()
    }

    /// A dispatcher builder seeded with the secret and subscriptions.
    pub fn dispatcher_builder(&self) -> DispatcherBuilder {
        let builder = DispatcherBuilder::default().subscriptions(self.events.iter().copied());
        match &self.secret {
            Some(secret) => builder.secret(secret.as_str()),
            None => builder,
        }
    }
}

fn parse_events(var: &'static str, val: &str) -> Result<Vec<EventKind>, ConfigError> {
    val.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            EventKind::from_spelling(entry).ok_or_else(|| ConfigError::UnknownEvent {
                var,
                value: entry.to_owned(),
            })
        })
        .collect()
}

fn parse_number<T>(var: &'static str, val: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    val.trim().parse().map_err(|source| ConfigError::InvalidNumber {
        var,
        value: val.to_owned(),
        source,
    })
}
