//! # giza-auth — Graph-Isomorphism Zero-Knowledge Authentication
//!
//! The interactive authentication protocol of the giza core: a prover
//! convinces a verifier that it knows the secret graph behind a published
//! commitment hash, without ever transmitting its seed, across
//! [`MAX_ROUNDS`](verifier::MAX_ROUNDS) commit/challenge/respond rounds.
//!
//! ## Protocol
//!
//! Per round, the prover draws a fresh uniform permutation π of its secret
//! graph G, commits to H = π(G) with hash(H), receives one verifier-chosen
//! challenge node c, and responds with its witness. The verifier checks
//! that mapping G's neighbors of π⁻¹(c) through π reproduces H's neighbors
//! of c — the prover demonstrates a consistent relabeling around a node it
//! could not predict when it committed.
//!
//! A cheating prover passes any single round with bounded probability, so
//! requiring all rounds to pass drives the false-accept probability down
//! geometrically: 5 rounds bound it by 2⁻⁵ under the protocol's security
//! argument.
//!
//! ## Disclosure Caveat
//!
//! This implementation preserves the deployed protocol's wire contract:
//! the response discloses the entire original graph and the full
//! permutation, not just the challenged node's mapping. That makes the
//! protocol NOT zero-knowledge across sessions that reuse one seed — an
//! eavesdropper on round 1 learns the secret graph outright. See
//! `Prover::respond` for details; DESIGN.md records the decision to keep
//! the legacy-compatible behavior.
//!
//! ## Failure Semantics
//!
//! A round that fails verification is recorded and the session proceeds —
//! it is never aborted early, so the timing of rejection does not reveal
//! which round failed. The completion report carries only coarse-grained
//! pass/fail plus round counters.

pub mod handshake;
pub mod prover;
pub mod registration;
pub mod store;
pub mod verifier;
pub mod wire;

pub use handshake::{complete_handshake, start_handshake, AuthError};
pub use prover::{Commitment, Prover, RoundResponse};
pub use registration::register;
pub use store::SessionStore;
pub use verifier::{RoundRecord, SessionCompletion, VerifierSession, MAX_ROUNDS};
pub use wire::{
    ChallengeMessage, CommitMessage, HandshakeMessage, RegistrationRecord, ResponseMessage,
    RoundOutcome,
};
