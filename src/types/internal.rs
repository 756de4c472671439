//! Internal data structures
//!
//! Values scraped from console responses while walking a single retrieval.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Anti-forgery token required by the legacy ajax endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a scraped token. Empty tokens are rejected.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of the escrowed FileVault key record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// FileVault 2 individual recovery key
///
/// `Debug` is redacted; call [`RecoveryKey::expose`] to print it.
#[derive(Debug)]
pub struct RecoveryKey(SecretString);

impl RecoveryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Borrow the plaintext key
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Progress through a retrieval
///
/// The sequence is linear; a failure at any stage ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    Resolved,
    Authenticated,
    KeyIdentified,
    KeyRetrieved,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Resolved => "resolved",
            Self::Authenticated => "authenticated",
            Self::KeyIdentified => "key-identified",
            Self::KeyRetrieved => "key-retrieved",
        };
        f.write_str(name)
    }
}
