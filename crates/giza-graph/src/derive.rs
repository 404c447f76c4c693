//! # Deterministic Secret-Graph Derivation
//!
//! Expands a party's secret seed into its secret graph. The seed is hashed
//! once with SHA-256 and the digest's bits are consumed sequentially, one
//! bit per candidate edge (i, j) with i < j in row order, cycling back to
//! the start of the digest if the candidates outnumber the bits. A
//! post-pass connects every isolated node to its cyclic successor so the
//! minimum degree is at least 1.
//!
//! ## Reproducibility Invariant
//!
//! The derivation is bit-for-bit deterministic: bit k of the stream is bit
//! `7 − (k mod 8)` of digest byte `(k / 8) mod 32` (MSB first). The prover
//! and the registration side must compute identical matrices from
//! identical seeds, or authentication cannot succeed.

use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// The default node count for derived secret graphs.
pub const DEFAULT_ORDER: usize = 8;

/// Derive the secret graph for a seed.
///
/// The seed itself is never stored in the result; only the prover holds
/// it, and only the derived matrix (via its commitment hash) is ever
/// published.
pub fn derive_secret_graph(seed: &[u8], order: usize) -> Graph {
    let digest = Sha256::digest(seed);
    let total_bits = digest.len() * 8;

    let mut graph = Graph::new(order);
    let mut bit_index = 0usize;
    for i in 0..order {
        for j in (i + 1)..order {
            let k = bit_index % total_bits;
            let bit = (digest[k / 8] >> (7 - (k % 8))) & 1;
            if bit == 1 {
                graph.adj[i][j] = 1;
                graph.adj[j][i] = 1;
            }
            bit_index += 1;
        }
    }

    // Guarantee minimum degree 1: isolated nodes get an edge to their
    // cyclic successor.
    for i in 0..order {
        if graph.adj[i].iter().all(|&cell| cell == 0) {
            let j = (i + 1) % order;
            graph.adj[i][j] = 1;
            graph.adj[j][i] = 1;
        }
    }

    graph
}
