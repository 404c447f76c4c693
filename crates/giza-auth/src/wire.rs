//! # Wire Message Shapes
//!
//! The core's transport-independent message contract. Field names follow
//! the deployed protocol's camelCase JSON encoding; numeric field elements
//! travel as fixed-width hex strings (compressed points, commitment
//! hashes) so hashes are reproducible across platforms.
//!
//! Deserialization is validating: adjacency matrices route through
//! `Graph::from_adjacency` and permutations through `Permutation::new`,
//! so a message that deserializes is structurally sound before any
//! cryptographic work happens.

use serde::{Deserialize, Serialize};

use giza_core::SessionId;
use giza_crypto::CompressedPoint;
use giza_graph::{Graph, GraphHash, Permutation};

/// Published once at registration time: the party's compressed public key
/// and the commitment hash of its secret graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Compressed public key: parity byte + big-endian x, hex-encoded.
    pub public_key_compressed: CompressedPoint,
    /// hash(secret graph), hex-encoded.
    pub graph_commitment_hash: GraphHash,
}

/// One side of the ECDH handshake: a session id plus that side's
/// compressed ephemeral public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeMessage {
    /// Correlates the two halves of the exchange.
    pub session_id: SessionId,
    /// The sender's compressed ephemeral public key.
    pub peer_public_key_compressed: CompressedPoint,
}

/// First half of a ZKP round: the prover's commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessage {
    /// The session this round belongs to.
    pub session_id: SessionId,
    /// The permuted graph H = π(G).
    pub permuted_graph_adjacency_matrix: Graph,
}

/// The verifier's reply to a commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMessage {
    /// The challenged node index, drawn uniformly from [0, n).
    pub challenge_node: usize,
}

/// Second half of a ZKP round: the prover's response.
///
/// Carries the full original graph and permutation per the deployed wire
/// contract — see the crate-level disclosure caveat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    /// The session this round belongs to.
    pub session_id: SessionId,
    /// The original secret graph G.
    pub original_graph_adjacency_matrix: Graph,
    /// The permutation π used for this round's commitment.
    pub permutation: Permutation,
    /// The challenge node being answered.
    pub challenge_node: usize,
}

/// The verifier's verdict for one round, plus session progress.
///
/// Deliberately coarse-grained: which check failed, and in which earlier
/// round, is withheld from the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    /// Whether this round's response verified.
    pub round_valid: bool,
    /// Rounds left before the session completes.
    pub rounds_remaining: usize,
    /// Whether the session has played all its rounds.
    pub complete: bool,
    /// Whether every round verified. Only meaningful when `complete`.
    pub authenticated: bool,
}
