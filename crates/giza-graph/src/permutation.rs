//! # Node Permutations
//!
//! A permutation is a bijection on {0..n−1}, stored as an array where
//! `perm[i]` is the image of node i. Applied to a graph it relabels every
//! edge — this is the isomorphism witness the prover reveals.
//!
//! Construction is always validated: a [`Permutation`] that exists is a
//! bijection, so downstream indexing never goes out of range.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use giza_core::GraphError;

/// A validated bijection on {0..n−1}.
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Validate an image array as a bijection on {0..n−1}.
    pub fn new(images: Vec<usize>) -> Result<Self, GraphError> {
        let n = images.len();
        let mut seen = vec![false; n];
        for (i, &image) in images.iter().enumerate() {
            if image >= n {
                return Err(GraphError::InvalidPermutation(format!(
                    "perm[{i}] = {image} out of range for length {n}"
                )));
            }
            if seen[image] {
                return Err(GraphError::InvalidPermutation(format!(
                    "image {image} appears more than once"
                )));
            }
            seen[image] = true;
        }
        Ok(Self(images))
    }

    /// The identity permutation on n nodes.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Draw a uniform random permutation via Fisher–Yates.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut images: Vec<usize> = (0..n).collect();
        images.shuffle(rng);
        Self(images)
    }

    /// Number of nodes permuted.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this permutes zero nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The image of a node, or `None` when out of range.
    pub fn image(&self, node: usize) -> Option<usize> {
        self.0.get(node).copied()
    }

    /// The inverse bijection: `inverse()[perm[i]] == i`.
    pub fn inverse(&self) -> Permutation {
        let mut inv = vec![0usize; self.0.len()];
        for (i, &image) in self.0.iter().enumerate() {
            inv[image] = i;
        }
        Permutation(inv)
    }

    /// The raw image array.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl std::fmt::Debug for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Permutation(len: {})", self.0.len())
    }
}

impl Serialize for Permutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Permutation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let images = Vec::<usize>::deserialize(deserializer)?;
        Permutation::new(images).map_err(serde::de::Error::custom)
    }
}
