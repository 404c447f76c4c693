//! # ECDH Handshake Driver
//!
//! Server-side handling for many concurrent key agreements: one
//! [`EcdhSession`] per authenticating party, held in a
//! [`SessionStore`] keyed by session id. Each exchange happens once —
//! start answers with our ephemeral public key, complete supplies the
//! peer's and yields the derived session key. The key itself is never
//! transmitted; both sides derive it independently.

use thiserror::Error;

use giza_core::{CryptoError, SessionError, SessionId};
use giza_crypto::{CompressedPoint, EcdhSession, SessionKey};

use crate::store::SessionStore;

/// Composite error for driver operations that cross the crypto/session
/// boundary.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A cryptographic operation failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// A session-store or round-ordering operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Start our side of a handshake: create an ephemeral session under the
/// given id and return our compressed public key for the out-of-band
/// exchange.
///
/// Reusing an id replaces any prior session — a restart, never a resume.
pub fn start_handshake(
    store: &mut SessionStore<EcdhSession>,
    session_id: SessionId,
) -> Result<CompressedPoint, AuthError> {
    let session = EcdhSession::new()?;
    let public = session.public_key();
    store.insert(session_id, session);
    Ok(public)
}

/// Complete a handshake: supply the peer's compressed public key and
/// return the derived session key.
pub fn complete_handshake(
    store: &mut SessionStore<EcdhSession>,
    session_id: &SessionId,
    peer: &CompressedPoint,
) -> Result<SessionKey, AuthError> {
    let session = store.get_mut(session_id)?;
    let key = session.key_with(peer)?.clone();
    Ok(key)
}
