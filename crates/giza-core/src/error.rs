//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the giza stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Malformed input is rejected synchronously, before any cryptographic
//!   work is performed.
//! - A failed verification round is data, not an error: the round record
//!   carries `valid: false` and the session proceeds. Only protocol misuse
//!   (unknown session, out-of-order message, expired session) surfaces as
//!   a `SessionError`.
//! - Cryptographic failures are never retried automatically; a new session
//!   with fresh randomness must be started instead.

use thiserror::Error;

/// Error in field and curve arithmetic, key handling, and key agreement.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Malformed input: bad key encoding, out-of-range scalar, point not
    /// on the curve. Rejected before any cryptographic work.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The modular inverse does not exist (gcd(a, m) != 1). Indicates a
    /// field or curve invariant violation; always fatal to the operation.
    #[error("no modular inverse: gcd({a}, {m}) != 1")]
    NoInverse {
        /// The element whose inverse was requested.
        a: String,
        /// The modulus.
        m: String,
    },

    /// A session key was requested before the handshake completed.
    #[error("session key not derived: peer public key has not been supplied")]
    KeyNotDerived,
}

/// Error in graph construction and permutation handling.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Adjacency matrix rows are not all the same length as the row count.
    #[error("adjacency matrix is not square: {rows} rows, row {row} has {len} columns")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// The matrix violates the undirected-graph symmetry invariant.
    #[error("adjacency matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index of the asymmetric cell.
        i: usize,
        /// Column index of the asymmetric cell.
        j: usize,
    },

    /// A matrix cell holds something other than 0 or 1.
    #[error("adjacency matrix cell ({i}, {j}) is {value}, expected 0 or 1")]
    BadCell {
        /// Row index of the bad cell.
        i: usize,
        /// Column index of the bad cell.
        j: usize,
        /// The offending value.
        value: u8,
    },

    /// A node index is outside the graph's node range.
    #[error("node {node} out of range for graph of order {order}")]
    NodeOutOfRange {
        /// The out-of-range node index.
        node: usize,
        /// The graph's node count.
        order: usize,
    },

    /// The permutation array is not a bijection on {0..n-1}.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A graph hash string failed to parse.
    #[error("invalid graph hash: {0}")]
    InvalidHash(String),

    /// A permutation's length does not match the graph's order.
    #[error("permutation of length {perm_len} applied to graph of order {order}")]
    PermutationMismatch {
        /// Length of the permutation array.
        perm_len: usize,
        /// Order of the graph it was applied to.
        order: usize,
    },
}

/// Error in ZKP and ECDH session handling.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session identifier is unknown. The caller must restart the
    /// handshake from scratch; there is no partial resume.
    #[error("session not found: {0}")]
    NotFound(crate::SessionId),

    /// The session exceeded its expiry horizon and has been evicted.
    #[error("session expired: {0}")]
    Expired(crate::SessionId),

    /// A round message arrived out of order (e.g. a response without a
    /// preceding commitment, or a second commitment while one round is in
    /// flight). Concurrent rounds for one session are a caller error.
    #[error("out-of-order round message: {0}")]
    OutOfOrder(String),

    /// A round message arrived after the session reached its terminal state.
    #[error("session is already complete")]
    AlreadyComplete,

    /// The round message failed structural validation before verification.
    #[error("invalid round input: {0}")]
    InvalidInput(String),
}
