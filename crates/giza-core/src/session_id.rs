//! # Session Identifier Newtype
//!
//! Newtype wrapper for the identifier that correlates the round-trip
//! messages of one authentication flow. A `SessionId` names exactly one
//! ZKP session or one ECDH handshake; it carries no other meaning.
//!
//! ## Security Invariant
//!
//! Session identifiers are v4 UUIDs drawn from the platform CSPRNG —
//! they are not guessable and not sequential, so an adversary cannot
//! enumerate or collide with another party's in-flight session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one authentication session (ZKP or ECDH).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a session identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}
