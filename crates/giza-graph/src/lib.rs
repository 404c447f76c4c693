//! # giza-graph — Graph Model for Isomorphism Proofs
//!
//! The combinatorial half of the authentication core: undirected graphs as
//! symmetric 0/1 adjacency matrices, node permutations as isomorphism
//! witnesses, SHA-256 content hashes as binding commitments, and the
//! deterministic derivation of a party's secret graph from its seed.
//!
//! This crate has no dependency on the curve — the graph protocol and the
//! key agreement share only `giza-core`.
//!
//! ## Reproducibility Invariant
//!
//! [`derive_secret_graph`] must be bit-for-bit reproducible: the prover
//! and the side that recomputes the registration commitment both derive
//! the secret graph independently from the same seed, and authentication
//! is only sound if they arrive at the identical adjacency matrix.
//!
//! ## Crate Policy
//!
//! - Depends only on `giza-core` internally.
//! - Seeds and secret graphs never appear in `Display`/`Debug` output of
//!   hashes or commitments.
//! - No `unsafe` code; no `panic!()` or `.unwrap()` outside tests.

pub mod derive;
pub mod graph;
pub mod permutation;

pub use derive::derive_secret_graph;
pub use graph::{Graph, GraphHash};
pub use permutation::Permutation;
