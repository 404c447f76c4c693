//! # ECDH Key Agreement
//!
//! Elliptic-curve Diffie–Hellman over the secp256k1 group: shared-secret
//! computation from one party's private scalar and the other's public
//! point, plus the one-way derivation of a 32-byte symmetric session key.
//!
//! Both parties arrive at the same secret because scalar multiplication
//! commutes through the group structure: a(bG) = b(aG).
//!
//! ## Security Invariant
//!
//! - The raw shared secret (an x-coordinate) is never used directly as a
//!   symmetric key; it passes through SHA-256 first.
//! - An [`EcdhSession`] transitions to "keyed" exactly once. Reading the
//!   session key before the peer's public key has been supplied is a
//!   caller error ([`CryptoError::KeyNotDerived`]), never a silent
//!   zero-key fallback.
//! - Peer points are validated against the curve equation before any
//!   scalar multiplication.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use giza_core::{encode_hex, CryptoError};

use crate::curve::{field_bytes, CompressedPoint, Point};
use crate::keys::{KeyPair, PrivateKey};

/// A derived 32-byte symmetric session key.
///
/// Opaque fixed-length byte string; `Debug` redacts the material.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string. Intended for tests and key
    /// confirmation digests, not for logging.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey(<redacted>)")
    }
}

/// Compute the ECDH shared secret: the x-coordinate of priv · peer.
///
/// The peer point must be a valid non-identity point on the curve; a
/// multiplication landing on the identity indicates degenerate input and
/// is rejected rather than yielding an undefined x-coordinate.
pub fn compute_shared_secret(
    private: &PrivateKey,
    peer: &Point,
) -> Result<BigUint, CryptoError> {
    if peer == &Point::Infinity {
        return Err(CryptoError::InvalidInput(
            "peer public key is the identity".to_string(),
        ));
    }
    if !peer.is_on_curve() {
        return Err(CryptoError::InvalidInput(
            "peer public key is not on the curve".to_string(),
        ));
    }
    match peer.scalar_mul_uint(private.as_scalar())? {
        Point::Affine { x, .. } => Ok(x),
        Point::Infinity => Err(CryptoError::InvalidInput(
            "shared-secret computation degenerated to the identity".to_string(),
        )),
    }
}

/// Derive the symmetric session key: SHA-256 over the fixed-width
/// big-endian encoding of the shared secret's x-coordinate.
pub fn derive_session_key(shared_secret: &BigUint) -> SessionKey {
    let digest = Sha256::digest(field_bytes(shared_secret));
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    SessionKey(key)
}

/// One side of an ECDH handshake.
///
/// Owns one ephemeral [`KeyPair`], the peer's point once supplied, and the
/// derived [`SessionKey`]. Lifecycle: created with fresh randomness,
/// keyed exactly once via [`EcdhSession::key_with`], then read-only.
#[derive(Debug)]
pub struct EcdhSession {
    keypair: KeyPair,
    peer: Option<Point>,
    key: Option<SessionKey>,
}

impl EcdhSession {
    /// Start a session with a fresh ephemeral key pair.
    pub fn new() -> Result<Self, CryptoError> {
        Ok(Self {
            keypair: KeyPair::generate()?,
            peer: None,
            key: None,
        })
    }

    /// Our ephemeral public key in compressed wire form, for the
    /// out-of-band exchange.
    pub fn public_key(&self) -> CompressedPoint {
        self.keypair.public_key_compressed()
    }

    /// Supply the peer's compressed public key and derive the session key.
    ///
    /// Transitions the session to "keyed" exactly once; keying an already
    /// keyed session is rejected ([`CryptoError::InvalidInput`]) — a new
    /// agreement requires a new session with fresh randomness.
    pub fn key_with(&mut self, peer: &CompressedPoint) -> Result<&SessionKey, CryptoError> {
        if self.key.is_some() {
            return Err(CryptoError::InvalidInput(
                "session is already keyed".to_string(),
            ));
        }
        let peer_point = Point::decompress(peer)?;
        let secret = compute_shared_secret(self.keypair.private_key(), &peer_point)?;
        self.peer = Some(peer_point);
        self.key = Some(derive_session_key(&secret));
        // The key was just stored; read it back through the accessor.
        self.session_key()
    }

    /// The derived session key.
    ///
    /// Fails with [`CryptoError::KeyNotDerived`] until the peer's public
    /// key has been supplied.
    pub fn session_key(&self) -> Result<&SessionKey, CryptoError> {
        self.key.as_ref().ok_or(CryptoError::KeyNotDerived)
    }

    /// Whether the handshake has completed on this side.
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }
}
