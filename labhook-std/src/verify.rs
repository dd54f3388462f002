//! Signature Verifier.
//!
//! GitLab sends the webhook's secret verbatim in `X-Gitlab-Token`; there is no
//! body signature. Verification therefore only needs the request head and runs
//! before the body is read.

use labhook_core::DispatchError;
use std::fmt;
use subtle::ConstantTimeEq;

/// The shared secret a receiver expects. `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a secret. An empty secret disables verification.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Whether verification is disabled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check the raw bytes of a request token against this secret.
    pub fn verify(&self, token: Option<&[u8]>) -> Result<(), DispatchError> {
        verify_token(&self.0, token)
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("SecretToken(<none>)")
        } else {
            f.write_str("SecretToken(<redacted>)")
        }
    }
}

impl From<String> for SecretToken {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for SecretToken {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}

/// Succeeds when `secret` is empty or `token` equals its UTF-8 bytes exactly.
///
/// `token` is the header value as sent. Header values may carry any byte
/// except controls, so the comparison is on bytes and constant time in the
/// token's content.
pub fn verify_token(secret: &str, token: Option<&[u8]>) -> Result<(), DispatchError> {
    if secret.is_empty() {
        return Ok(());
    }
    match token {
        Some(token) if bool::from(secret.as_bytes().ct_eq(token)) => Ok(()),
        _ => Err(DispatchError::AuthenticationFailed),
    }
}
