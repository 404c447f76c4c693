//! # Adjacency-Matrix Graphs and Commitment Hashes
//!
//! An undirected graph over labeled nodes 0..n−1, stored as an n×n
//! symmetric 0/1 adjacency matrix, plus its SHA-256 content hash used as
//! the binding commitment in the proof protocol.
//!
//! ## Invariant
//!
//! `adj[i][j] == adj[j][i]` at all times. The only mutating operation,
//! [`Graph::add_edge`], writes both cells; the validated constructor
//! [`Graph::from_adjacency`] rejects asymmetric input before a `Graph`
//! exists.
//!
//! ## Hash Encoding
//!
//! The commitment hash is SHA-256 over the row-major 0/1 bytes of the
//! full matrix. The encoding is fixed so two independent implementations
//! hashing the same graph produce the same commitment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use giza_core::{decode_hex_exact, encode_hex, GraphError};

use crate::permutation::Permutation;

/// The SHA-256 content hash of a graph's adjacency matrix.
///
/// Binding: a hash cannot be reinterpreted as a different matrix after
/// the fact. Serializes as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphHash([u8; 32]);

impl GraphHash {
    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, GraphError> {
        let bytes = decode_hex_exact(hex, 32).map_err(GraphError::InvalidHash)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Serialize for GraphHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GraphHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for GraphHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "GraphHash({prefix}...)")
    }
}

impl std::fmt::Display for GraphHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An undirected graph over nodes 0..n−1 as a symmetric adjacency matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct Graph {
    pub(crate) order: usize,
    pub(crate) adj: Vec<Vec<u8>>,
}

impl Graph {
    /// An edgeless graph on `order` nodes.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            adj: vec![vec![0u8; order]; order],
        }
    }

    /// Validated constructor from a raw adjacency matrix.
    ///
    /// Rejects non-square, asymmetric, and non-0/1 input. This is the
    /// single entry point for externally supplied matrices — wire
    /// deserialization routes through it.
    pub fn from_adjacency(rows: Vec<Vec<u8>>) -> Result<Self, GraphError> {
        let order = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != order {
                return Err(GraphError::NotSquare {
                    rows: order,
                    row: i,
                    len: row.len(),
                });
            }
        }
        for i in 0..order {
            for j in 0..order {
                let value = rows[i][j];
                if value > 1 {
                    return Err(GraphError::BadCell { i, j, value });
                }
                if rows[i][j] != rows[j][i] {
                    return Err(GraphError::NotSymmetric { i, j });
                }
            }
        }
        Ok(Self { order, adj: rows })
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Add the undirected edge (i, j). Sets both cells; idempotent.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        self.check_node(i)?;
        self.check_node(j)?;
        self.adj[i][j] = 1;
        self.adj[j][i] = 1;
        Ok(())
    }

    /// Whether the edge (i, j) is present.
    pub fn has_edge(&self, i: usize, j: usize) -> Result<bool, GraphError> {
        self.check_node(i)?;
        self.check_node(j)?;
        Ok(self.adj[i][j] == 1)
    }

    /// The neighbor set of a node, in ascending order.
    pub fn neighbors(&self, node: usize) -> Result<Vec<usize>, GraphError> {
        self.check_node(node)?;
        Ok(self.adj[node]
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == 1)
            .map(|(j, _)| j)
            .collect())
    }

    /// The degree of a node.
    pub fn degree(&self, node: usize) -> Result<usize, GraphError> {
        Ok(self.neighbors(node)?.len())
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let mut count = 0;
        for i in 0..self.order {
            for j in i..self.order {
                if self.adj[i][j] == 1 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Relabel every edge through a permutation, producing an isomorphic
    /// graph: for each edge (i, j), the image has edge (π(i), π(j)).
    ///
    /// The result has the same edge count and degree sequence as `self`
    /// and is isomorphic by construction.
    pub fn apply_permutation(&self, perm: &Permutation) -> Result<Graph, GraphError> {
        if perm.len() != self.order {
            return Err(GraphError::PermutationMismatch {
                perm_len: perm.len(),
                order: self.order,
            });
        }
        let mut image = Graph::new(self.order);
        for i in 0..self.order {
            for j in i..self.order {
                if self.adj[i][j] == 1 {
                    // Indices are in range: perm is a validated bijection
                    // on 0..order.
                    let (pi, pj) = (perm.as_slice()[i], perm.as_slice()[j]);
                    image.adj[pi][pj] = 1;
                    image.adj[pj][pi] = 1;
                }
            }
        }
        Ok(image)
    }

    /// The SHA-256 commitment hash over the row-major 0/1 bytes of the
    /// full adjacency matrix.
    pub fn commitment_hash(&self) -> GraphHash {
        let mut hasher = Sha256::new();
        for row in &self.adj {
            hasher.update(row);
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        GraphHash(bytes)
    }

    /// The raw adjacency rows.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.adj
    }

    fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node >= self.order {
            return Err(GraphError::NodeOutOfRange {
                node,
                order: self.order,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph(order: {}, edges: {})",
            self.order,
            self.edge_count()
        )
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.adj.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Graph::from_adjacency(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        // 0 - 1 - 2 - 3
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g
    }

    #[test]
    fn test_new_graph_is_edgeless() {
        let g = Graph::new(5);
        assert_eq!(g.order(), 5);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_is_symmetric_and_idempotent() {
        let mut g = Graph::new(3);
        g.add_edge(0, 2).unwrap();
        g.add_edge(0, 2).unwrap();
        assert!(g.has_edge(0, 2).unwrap());
        assert!(g.has_edge(2, 0).unwrap());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_out_of_range() {
        let mut g = Graph::new(3);
        assert!(matches!(
            g.add_edge(0, 3),
            Err(GraphError::NodeOutOfRange { node: 3, order: 3 })
        ));
    }

    #[test]
    fn test_neighbors_sorted() {
        let g = path_graph();
        assert_eq!(g.neighbors(1).unwrap(), vec![0, 2]);
        assert_eq!(g.neighbors(0).unwrap(), vec![1]);
        assert_eq!(g.degree(2).unwrap(), 2);
    }

    #[test]
    fn test_from_adjacency_accepts_valid() {
        let g = Graph::from_adjacency(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert!(g.has_edge(0, 1).unwrap());
    }

    #[test]
    fn test_from_adjacency_rejects_non_square() {
        let err = Graph::from_adjacency(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, GraphError::NotSquare { .. }));
    }

    #[test]
    fn test_from_adjacency_rejects_asymmetric() {
        let err = Graph::from_adjacency(vec![vec![0, 1], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, GraphError::NotSymmetric { .. }));
    }

    #[test]
    fn test_from_adjacency_rejects_bad_cell() {
        let err = Graph::from_adjacency(vec![vec![0, 2], vec![2, 0]]).unwrap_err();
        assert!(matches!(err, GraphError::BadCell { value: 2, .. }));
    }

    #[test]
    fn test_apply_permutation_preserves_edge_count() {
        let g = path_graph();
        let perm = Permutation::new(vec![3, 1, 0, 2]).unwrap();
        let image = g.apply_permutation(&perm).unwrap();
        assert_eq!(image.edge_count(), g.edge_count());
    }

    #[test]
    fn test_apply_permutation_relabels_edges() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1).unwrap();
        let perm = Permutation::new(vec![2, 0, 1]).unwrap();
        let image = g.apply_permutation(&perm).unwrap();
        assert!(image.has_edge(2, 0).unwrap());
        assert!(!image.has_edge(0, 1).unwrap());
    }

    #[test]
    fn test_apply_inverse_permutation_roundtrip() {
        let g = path_graph();
        let perm = Permutation::new(vec![1, 3, 0, 2]).unwrap();
        let there = g.apply_permutation(&perm).unwrap();
        let back = there.apply_permutation(&perm.inverse()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_apply_permutation_length_mismatch() {
        let g = path_graph();
        let perm = Permutation::new(vec![0, 1, 2]).unwrap();
        assert!(matches!(
            g.apply_permutation(&perm),
            Err(GraphError::PermutationMismatch { .. })
        ));
    }

    #[test]
    fn test_commitment_hash_is_deterministic() {
        let g = path_graph();
        assert_eq!(g.commitment_hash(), path_graph().commitment_hash());
    }

    #[test]
    fn test_commitment_hash_differs_on_edge_change() {
        let g = path_graph();
        let mut h = path_graph();
        h.add_edge(0, 3).unwrap();
        assert_ne!(g.commitment_hash(), h.commitment_hash());
    }

    #[test]
    fn test_graph_hash_hex_roundtrip() {
        let hash = path_graph().commitment_hash();
        let back = GraphHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, back);
    }

    #[test]
    fn test_graph_serde_roundtrip() {
        let g = path_graph();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_graph_deserialize_rejects_asymmetric() {
        let json = "[[0,1],[0,0]]";
        assert!(serde_json::from_str::<Graph>(json).is_err());
    }

    #[test]
    fn test_debug_shows_no_matrix() {
        let g = path_graph();
        let debug = format!("{g:?}");
        assert_eq!(debug, "Graph(order: 4, edges: 3)");
    }
}
