//! # Session Store
//!
//! The only shared mutable resource in the core: an explicit store object
//! keyed by [`SessionId`], passed by reference to whatever drives the
//! protocol — never an ambient process-wide map. Holds either verifier
//! sessions or ECDH sessions; the store itself is generic over the entry
//! type and owns the bookkeeping timestamps.
//!
//! ## Concurrency Model
//!
//! Access to a given session's record must be serialized by the caller —
//! one round in flight at a time per session. The store is `&mut`-only,
//! so the borrow checker enforces exclusive access within one store;
//! sharing across threads means wrapping the store in a lock, which keeps
//! that serialization visible at the call site.
//!
//! ## Expiry
//!
//! Sessions that never complete are reclaimed: entries past the expiry
//! horizon are evicted lazily on access (reported as
//! [`SessionError::Expired`]) and in bulk by [`SessionStore::sweep_expired`].
//! Tearing down one session never touches any other.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use giza_core::{SessionError, SessionId};

struct Entry<T> {
    touched_at: DateTime<Utc>,
    inner: T,
}

/// A store of per-session state with an expiry horizon.
pub struct SessionStore<T> {
    sessions: HashMap<SessionId, Entry<T>>,
    horizon: Duration,
}

impl<T> SessionStore<T> {
    /// Create a store whose entries expire `horizon` after last activity.
    pub fn new(horizon: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            horizon,
        }
    }

    /// Insert a session, replacing any existing entry under the same id.
    ///
    /// Replacement is deliberate: a caller restarting a handshake gets a
    /// clean slate, never a partial resume.
    pub fn insert(&mut self, id: SessionId, inner: T) {
        self.sessions.insert(
            id,
            Entry {
                touched_at: Utc::now(),
                inner,
            },
        );
    }

    /// Borrow a session mutably, refreshing its activity timestamp.
    ///
    /// An entry past the expiry horizon is evicted and reported as
    /// [`SessionError::Expired`]; an unknown id is
    /// [`SessionError::NotFound`].
    pub fn get_mut(&mut self, id: &SessionId) -> Result<&mut T, SessionError> {
        let now = Utc::now();
        // Expiry is decided on a shared borrow first; returning the
        // mutable borrow out of a match arm would pin it for the whole
        // lookup and forbid the eviction in the expired arm.
        let expired = match self.sessions.get(id) {
            None => return Err(SessionError::NotFound(id.clone())),
            Some(entry) => now - entry.touched_at > self.horizon,
        };
        if expired {
            self.sessions.remove(id);
            tracing::debug!(session = %id, "expired session evicted on access");
            return Err(SessionError::Expired(id.clone()));
        }
        match self.sessions.get_mut(id) {
            Some(entry) => {
                entry.touched_at = now;
                Ok(&mut entry.inner)
            }
            None => Err(SessionError::NotFound(id.clone())),
        }
    }

    /// Remove a session, returning its state if present.
    pub fn remove(&mut self, id: &SessionId) -> Option<T> {
        self.sessions.remove(id).map(|entry| entry.inner)
    }

    /// Evict every session past the expiry horizon; returns the count.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        let horizon = self.horizon;
        self.sessions
            .retain(|_, entry| now - entry.touched_at <= horizon);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.sessions.len(), "expiry sweep");
        }
        evicted
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Whether a session id is currently present (expired entries count
    /// until evicted).
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }
}

impl<T> std::fmt::Debug for SessionStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SessionStore(sessions: {}, horizon: {:?})",
            self.sessions.len(),
            self.horizon
        )
    }
}
