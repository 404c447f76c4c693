//! # Registration
//!
//! Produces the record a party publishes before it can authenticate: its
//! compressed public key and the commitment hash of its secret graph.
//! The seed itself never leaves the prover; the verifier side later
//! recomputes the same derivation when it needs the hash, which is why
//! [`giza_graph::derive_secret_graph`] must be bit-for-bit reproducible.

use giza_crypto::KeyPair;
use giza_graph::derive_secret_graph;

use crate::wire::RegistrationRecord;

/// Build the published registration record for a seed and key pair.
pub fn register(seed: &[u8], order: usize, keypair: &KeyPair) -> RegistrationRecord {
    let secret = derive_secret_graph(seed, order);
    RegistrationRecord {
        public_key_compressed: keypair.public_key_compressed(),
        graph_commitment_hash: secret.commitment_hash(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prover::Prover;

    #[test]
    fn test_registration_hash_matches_prover() {
        let keypair = KeyPair::generate().unwrap();
        let record = register(b"abc", 8, &keypair);
        let prover = Prover::from_seed(b"abc", 8);
        assert_eq!(record.graph_commitment_hash, prover.secret_hash());
    }

    #[test]
    fn test_registration_is_reproducible() {
        let keypair = KeyPair::generate().unwrap();
        let a = register(b"abc", 8, &keypair);
        let b = register(b"abc", 8, &keypair);
        assert_eq!(a.graph_commitment_hash, b.graph_commitment_hash);
        assert_eq!(a.public_key_compressed, b.public_key_compressed);
    }

    #[test]
    fn test_seed_never_appears_in_record() {
        let keypair = KeyPair::generate().unwrap();
        let record = register(b"hunter2", 8, &keypair);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
