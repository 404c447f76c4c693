//! # Verifier Role — Round State Machine
//!
//! One [`VerifierSession`] per authenticating party, created when
//! authentication begins and mutated by exactly one round in flight at a
//! time. The session alternates between awaiting a commitment and
//! awaiting the response to an issued challenge, accumulating one
//! [`RoundRecord`] per completed round until [`MAX_ROUNDS`] is reached.
//!
//! ## Verification
//!
//! A round is valid when all three checks pass:
//!
//! 1. The revealed original graph hashes to the commitment hash that was
//!    registered for this party (a prover with the wrong seed fails every
//!    round here).
//! 2. The response's challenge node matches the one this session issued.
//! 3. Mapping the original graph's neighbors of π⁻¹(c) through π equals,
//!    as a set, the committed graph's neighbors of c.
//!
//! ## Failure Semantics
//!
//! An invalid round is recorded and the session proceeds to the next
//! round — it is already doomed to fail at completion, but it is never
//! aborted early, so the timing of rejection does not leak which round
//! failed. Out-of-order messages (a response with no challenge
//! outstanding, a commitment while one is) are caller errors, not
//! recorded rounds.

use std::collections::BTreeSet;

use rand::Rng;

use giza_core::{SessionError, SessionId};
use giza_graph::{Graph, GraphHash, Permutation};

use crate::wire::RoundOutcome;

/// Production round count: bounds a cheating prover's false-accept
/// probability by 2⁻⁵.
pub const MAX_ROUNDS: usize = 5;

/// The record of one completed round.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    /// The binding hash of the round's committed (permuted) graph.
    pub commitment_hash: GraphHash,
    /// The challenge node issued for the round.
    pub challenge: usize,
    /// Whether the response verified.
    pub valid: bool,
}

/// The terminal report for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompletion {
    /// Whether all rounds have been played.
    pub complete: bool,
    /// Whether every round verified. Only meaningful once `complete`.
    pub authenticated: bool,
}

enum RoundPhase {
    AwaitingCommitment,
    AwaitingResponse { commitment: Graph, challenge: usize },
}

/// The verifier's per-party session state.
pub struct VerifierSession {
    id: SessionId,
    registered_hash: GraphHash,
    order: usize,
    max_rounds: usize,
    rounds: Vec<RoundRecord>,
    phase: RoundPhase,
}

impl VerifierSession {
    /// Start a session against a registered commitment hash, with the
    /// production round count.
    pub fn new(id: SessionId, registered_hash: GraphHash, order: usize) -> Self {
        Self::with_max_rounds(id, registered_hash, order, MAX_ROUNDS)
    }

    /// Start a session with an explicit round count (tests and future
    /// protocol tuning).
    pub fn with_max_rounds(
        id: SessionId,
        registered_hash: GraphHash,
        order: usize,
        max_rounds: usize,
    ) -> Self {
        tracing::debug!(session = %id, order, max_rounds, "verifier session started");
        Self {
            id,
            registered_hash,
            order,
            max_rounds,
            rounds: Vec::with_capacity(max_rounds),
            phase: RoundPhase::AwaitingCommitment,
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Rounds recorded so far.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Record a round's commitment and issue the challenge: one node
    /// index drawn uniformly from [0, n).
    pub fn challenge<R: Rng>(
        &mut self,
        commitment: Graph,
        rng: &mut R,
    ) -> Result<usize, SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyComplete);
        }
        if matches!(self.phase, RoundPhase::AwaitingResponse { .. }) {
            return Err(SessionError::OutOfOrder(
                "commitment received while a challenge is outstanding".to_string(),
            ));
        }
        if self.order == 0 {
            return Err(SessionError::InvalidInput(
                "session graph order is zero; nothing to challenge".to_string(),
            ));
        }
        if commitment.order() != self.order {
            return Err(SessionError::InvalidInput(format!(
                "committed graph has order {}, session expects {}",
                commitment.order(),
                self.order
            )));
        }

        let challenge = rng.gen_range(0..self.order);
        tracing::debug!(
            session = %self.id,
            round = self.rounds.len(),
            challenge,
            "challenge issued"
        );
        self.phase = RoundPhase::AwaitingResponse {
            commitment,
            challenge,
        };
        Ok(challenge)
    }

    /// Verify the prover's response for the round in flight, record the
    /// round, and advance.
    pub fn verify_response(
        &mut self,
        original: &Graph,
        permutation: &Permutation,
        challenge_node: usize,
    ) -> Result<RoundOutcome, SessionError> {
        let (commitment, challenge) = match &self.phase {
            RoundPhase::AwaitingResponse {
                commitment,
                challenge,
            } => (commitment, *challenge),
            RoundPhase::AwaitingCommitment => {
                return Err(SessionError::OutOfOrder(
                    "response received with no challenge outstanding".to_string(),
                ));
            }
        };
        if challenge_node != challenge {
            return Err(SessionError::InvalidInput(format!(
                "response answers challenge node {challenge_node}, session issued {challenge}"
            )));
        }
        if original.order() != self.order || permutation.len() != self.order {
            return Err(SessionError::InvalidInput(
                "response graph or permutation does not match the session order".to_string(),
            ));
        }

        let hash_matches = original.commitment_hash() == self.registered_hash;
        let mapping_consistent =
            neighbor_mapping_consistent(original, permutation, commitment, challenge);
        let valid = hash_matches && mapping_consistent;

        self.rounds.push(RoundRecord {
            commitment_hash: commitment.commitment_hash(),
            challenge,
            valid,
        });
        self.phase = RoundPhase::AwaitingCommitment;

        let completion = self.completion();
        tracing::debug!(
            session = %self.id,
            round = self.rounds.len(),
            valid,
            complete = completion.complete,
            "round verified"
        );
        Ok(RoundOutcome {
            round_valid: valid,
            rounds_remaining: self.max_rounds - self.rounds.len(),
            complete: completion.complete,
            authenticated: completion.authenticated,
        })
    }

    /// Whether all rounds have been played.
    pub fn is_complete(&self) -> bool {
        self.rounds.len() >= self.max_rounds
    }

    /// The terminal report: complete once all rounds are played,
    /// authenticated only if every recorded round verified. A single
    /// invalid round is fatal to the whole session — no partial credit,
    /// no per-round retry.
    pub fn completion(&self) -> SessionCompletion {
        let complete = self.is_complete();
        SessionCompletion {
            complete,
            authenticated: complete && self.rounds.iter().all(|r| r.valid),
        }
    }
}

impl std::fmt::Debug for VerifierSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VerifierSession({}, rounds: {}/{})",
            self.id,
            self.rounds.len(),
            self.max_rounds
        )
    }
}

/// The core consistency check: the permuted image of the original graph's
/// neighbors of π⁻¹(c) must equal, as a set, the committed graph's
/// neighbors of c. Set equality — order-independent.
fn neighbor_mapping_consistent(
    original: &Graph,
    permutation: &Permutation,
    commitment: &Graph,
    challenge: usize,
) -> bool {
    let inverse = permutation.inverse();
    let Some(pre_image) = inverse.image(challenge) else {
        return false;
    };
    let Ok(original_neighbors) = original.neighbors(pre_image) else {
        return false;
    };
    let Ok(committed_neighbors) = commitment.neighbors(challenge) else {
        return false;
    };

    let mapped: BTreeSet<usize> = original_neighbors
        .iter()
        .filter_map(|&u| permutation.image(u))
        .collect();
    let expected: BTreeSet<usize> = committed_neighbors.into_iter().collect();
    mapped == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prover::Prover;
    use rand::rngs::OsRng;

    fn session_for(prover: &Prover) -> VerifierSession {
        VerifierSession::new(SessionId::new(), prover.secret_hash(), prover.order())
    }

    #[test]
    fn test_honest_round_verifies() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);

        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        let response = prover.respond(challenge).unwrap();
        let outcome = session
            .verify_response(&response.original, &response.permutation, challenge)
            .unwrap();

        assert!(outcome.round_valid);
        assert_eq!(outcome.rounds_remaining, MAX_ROUNDS - 1);
        assert!(!outcome.complete);
    }

    #[test]
    fn test_challenge_in_range() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);
        for _ in 0..MAX_ROUNDS {
            let commitment = prover.commit(&mut OsRng).unwrap();
            let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
            assert!(challenge < 8);
            let response = prover.respond(challenge).unwrap();
            session
                .verify_response(&response.original, &response.permutation, challenge)
                .unwrap();
        }
    }

    #[test]
    fn test_response_without_challenge_is_out_of_order() {
        let prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);
        let g = giza_graph::derive_secret_graph(b"abc", 8);
        let perm = Permutation::identity(8);
        assert!(matches!(
            session.verify_response(&g, &perm, 0),
            Err(SessionError::OutOfOrder(_))
        ));
    }

    #[test]
    fn test_double_commitment_is_out_of_order() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);
        let first = prover.commit(&mut OsRng).unwrap();
        session.challenge(first.graph, &mut OsRng).unwrap();
        let second = prover.commit(&mut OsRng).unwrap();
        assert!(matches!(
            session.challenge(second.graph, &mut OsRng),
            Err(SessionError::OutOfOrder(_))
        ));
    }

    #[test]
    fn test_order_mismatch_rejected_before_challenge() {
        let prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);
        let wrong = Graph::new(4);
        assert!(matches!(
            session.challenge(wrong, &mut OsRng),
            Err(SessionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_wrong_challenge_node_rejected() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = session_for(&prover);
        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        let response = prover.respond(challenge).unwrap();
        let wrong = (challenge + 1) % 8;
        assert!(matches!(
            session.verify_response(&response.original, &response.permutation, wrong),
            Err(SessionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inconsistent_permutation_fails_round_but_not_session() {
        // Secret: single edge (0, 1) on 3 nodes. Commit the graph itself
        // (identity), then claim the witness was [0, 2, 1] — that
        // permutation is inconsistent around every possible challenge
        // node, so the round fails deterministically.
        let mut secret = Graph::new(3);
        secret.add_edge(0, 1).unwrap();
        let mut session =
            VerifierSession::new(SessionId::new(), secret.commitment_hash(), 3);

        let challenge = session.challenge(secret.clone(), &mut OsRng).unwrap();
        let bogus = Permutation::new(vec![0, 2, 1]).unwrap();
        let outcome = session
            .verify_response(&secret, &bogus, challenge)
            .unwrap();

        assert!(!outcome.round_valid);
        assert_eq!(outcome.rounds_remaining, MAX_ROUNDS - 1);
        // The session continues; it is simply doomed.
        assert!(!session.is_complete());
    }

    #[test]
    fn test_wrong_secret_graph_fails_hash_check() {
        let mut prover = Prover::from_seed(b"wrong seed", 8);
        let registered = giza_graph::derive_secret_graph(b"abc", 8).commitment_hash();
        let mut session = VerifierSession::new(SessionId::new(), registered, 8);

        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        let response = prover.respond(challenge).unwrap();
        let outcome = session
            .verify_response(&response.original, &response.permutation, challenge)
            .unwrap();
        assert!(!outcome.round_valid);
    }

    #[test]
    fn test_completion_requires_all_rounds_valid() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = VerifierSession::with_max_rounds(
            SessionId::new(),
            prover.secret_hash(),
            8,
            2,
        );

        // Round 1: honest.
        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        let response = prover.respond(challenge).unwrap();
        session
            .verify_response(&response.original, &response.permutation, challenge)
            .unwrap();

        // Round 2: honest commitment, wrong original graph revealed.
        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        prover.respond(challenge).unwrap();
        let wrong = giza_graph::derive_secret_graph(b"not abc", 8);
        let outcome = session
            .verify_response(&wrong, &Permutation::identity(8), challenge)
            .unwrap();

        assert!(outcome.complete);
        assert!(!outcome.authenticated);
        let completion = session.completion();
        assert!(completion.complete && !completion.authenticated);
    }

    #[test]
    fn test_message_after_completion_rejected() {
        let mut prover = Prover::from_seed(b"abc", 8);
        let mut session = VerifierSession::with_max_rounds(
            SessionId::new(),
            prover.secret_hash(),
            8,
            1,
        );
        let commitment = prover.commit(&mut OsRng).unwrap();
        let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
        let response = prover.respond(challenge).unwrap();
        session
            .verify_response(&response.original, &response.permutation, challenge)
            .unwrap();

        let next = prover.commit(&mut OsRng).unwrap();
        assert!(matches!(
            session.challenge(next.graph, &mut OsRng),
            Err(SessionError::AlreadyComplete)
        ));
    }
}
