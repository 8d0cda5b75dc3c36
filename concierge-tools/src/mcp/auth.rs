//! Bearer token gate protecting every tool call.
//!
//! The gate is a pure predicate over one configured shared secret: it admits
//! a caller whose presented credential is byte-for-byte equal to the secret
//! and hands back a fixed identity carrying no scopes and no expiry. It
//! performs no logging and no retries; the transport layer turns a rejection
//! into an authorization failure before any tool body executes.

use thiserror::Error;

/// Authentication failures produced by the token gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The configured shared secret is empty.
    #[error("auth token must be non-empty")]
    EmptySecret,

    /// The Authorization header is missing or is not a `Bearer` credential.
    #[error("missing or malformed Authorization header")]
    MalformedHeader,

    /// The presented credential does not match the configured secret.
    #[error("invalid authorization token")]
    InvalidToken,
}

/// Identity granted to an authenticated caller.
///
/// There is no per-caller identity: every accepted credential maps to the
/// same placeholder client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Fixed placeholder client id.
    pub client_id: &'static str,
    /// Always empty; the gate grants no scopes.
    pub scopes: Vec<String>,
    /// Always `None`; credentials do not expire while the process runs.
    pub expires_at: Option<u64>,
}

impl Identity {
    fn granted() -> Self {
        Self {
            client_id: "unknown",
            scopes: Vec::new(),
            expires_at: None,
        }
    }
}

/// Validates presented bearer credentials against the configured secret.
#[derive(Clone, Debug)]
pub struct TokenGate {
    secret: String,
}

impl TokenGate {
    /// Creates a gate for the given shared secret.
    ///
    /// An empty or whitespace-only secret is rejected at construction so a
    /// misconfigured server cannot silently accept empty credentials.
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self { secret })
    }

    /// Accepts iff `presented` equals the configured secret.
    pub fn authenticate(&self, presented: &str) -> Result<Identity, AuthError> {
        if constant_time_eq(presented, &self.secret) {
            Ok(Identity::granted())
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    /// Validates an RFC 6750 `Authorization: Bearer <token>` header value.
    pub fn authorize_header(&self, header_value: &str) -> Result<Identity, AuthError> {
        let header_value = header_value.trim();
        let Some(rest) = header_value.strip_prefix("Bearer ") else {
            return Err(AuthError::MalformedHeader);
        };
        self.authenticate(rest.trim())
    }
}

/// Comparison touches every byte regardless of where the first mismatch is,
/// so the timing does not leak the matching prefix length.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}
