//! # Prover Role
//!
//! The prover's half of one authentication flow: it holds the secret graph
//! derived from its seed, and per round produces a fresh permuted
//! commitment and then the response to the verifier's challenge.
//!
//! ## Security Invariant
//!
//! The seed is consumed at construction and never stored; the permutation
//! drawn for a round is held only until the response for that round is
//! produced. `Debug` output reveals neither the secret graph nor a pending
//! permutation.

use rand::Rng;

use giza_core::{GraphError, SessionError};
use giza_graph::{derive_secret_graph, Graph, GraphHash, Permutation};

/// A per-round commitment: the permuted graph and its binding hash, sent
/// before any challenge is revealed.
#[derive(Debug, Clone)]
pub struct Commitment {
    /// The permuted graph H = π(G).
    pub graph: Graph,
    /// hash(H) — binds the prover to H before the challenge.
    pub hash: GraphHash,
}

/// The prover's answer to a challenge.
///
/// Legacy-compatible full disclosure: carries the entire original secret
/// graph and the full permutation, matching the deployed wire contract.
/// This defeats zero-knowledge for any later session reusing the same
/// seed — see the crate-level docs.
#[derive(Debug, Clone)]
pub struct RoundResponse {
    /// The original secret graph G.
    pub original: Graph,
    /// The permutation π used for this round's commitment.
    pub permutation: Permutation,
    /// The challenge node this response answers.
    pub challenge_node: usize,
}

/// The prover's session state: the secret graph plus the permutation of
/// the round currently in flight, if any.
pub struct Prover {
    secret: Graph,
    pending: Option<Permutation>,
}

impl Prover {
    /// Build a prover by deriving the secret graph from a seed.
    pub fn from_seed(seed: &[u8], order: usize) -> Self {
        Self::new(derive_secret_graph(seed, order))
    }

    /// Build a prover around an already-derived secret graph.
    pub fn new(secret: Graph) -> Self {
        Self {
            secret,
            pending: None,
        }
    }

    /// The commitment hash of the secret graph — the value published at
    /// registration time.
    pub fn secret_hash(&self) -> GraphHash {
        self.secret.commitment_hash()
    }

    /// The node count of the secret graph.
    pub fn order(&self) -> usize {
        self.secret.order()
    }

    /// Start a round: draw a fresh uniform permutation, apply it to the
    /// secret graph, and commit to the result.
    ///
    /// Committing while a round is in flight abandons the previous round;
    /// its permutation is discarded and never revealed.
    pub fn commit<R: Rng>(&mut self, rng: &mut R) -> Result<Commitment, GraphError> {
        let permutation = Permutation::random(self.secret.order(), rng);
        let graph = self.secret.apply_permutation(&permutation)?;
        let hash = graph.commitment_hash();
        self.pending = Some(permutation);
        Ok(Commitment { graph, hash })
    }

    /// Answer the verifier's challenge for the round in flight.
    ///
    /// Fails with [`SessionError::OutOfOrder`] when no commitment is
    /// pending, and with [`SessionError::InvalidInput`] when the challenge
    /// node is outside the graph.
    pub fn respond(&mut self, challenge_node: usize) -> Result<RoundResponse, SessionError> {
        if challenge_node >= self.secret.order() {
            return Err(SessionError::InvalidInput(format!(
                "challenge node {challenge_node} out of range for order {}",
                self.secret.order()
            )));
        }
        let permutation = self.pending.take().ok_or_else(|| {
            SessionError::OutOfOrder("response requested with no commitment in flight".to_string())
        })?;
        Ok(RoundResponse {
            original: self.secret.clone(),
            permutation,
            challenge_node,
        })
    }
}

impl std::fmt::Debug for Prover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Prover(order: {}, round in flight: {})",
            self.secret.order(),
            self.pending.is_some()
        )
    }
}
