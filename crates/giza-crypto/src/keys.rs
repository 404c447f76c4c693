//! # Key Pairs
//!
//! Ephemeral key-pair generation for the curve group: a private scalar in
//! [1, n−1] and its derived public point.
//!
//! ## Security Invariant
//!
//! Private keys are never serialized or logged. [`PrivateKey`] does not
//! implement `Serialize` and its `Debug` impl redacts the scalar. A fresh
//! key pair is drawn per session; ephemeral keys are never reused across
//! unrelated agreements.

use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

use giza_core::CryptoError;

use crate::curve::{secp256k1, CompressedPoint, Point};

/// A private scalar in the range [1, n−1].
///
/// Does not implement `Serialize` — private keys must not leak into logs,
/// responses, or artifacts.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(BigUint);

impl PrivateKey {
    /// Validate a scalar as a private key. Must lie in [1, n−1].
    pub fn from_scalar(scalar: BigUint) -> Result<Self, CryptoError> {
        let n = &secp256k1().n;
        if scalar < BigUint::one() || &scalar >= n {
            return Err(CryptoError::InvalidInput(
                "private scalar out of range [1, n-1]".to_string(),
            ));
        }
        Ok(Self(scalar))
    }

    /// The raw scalar, for scalar multiplication.
    pub fn as_scalar(&self) -> &BigUint {
        &self.0
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey(<private>)")
    }
}

/// A private scalar together with its derived public point.
pub struct KeyPair {
    private: PrivateKey,
    public: Point,
}

impl KeyPair {
    /// Generate a fresh key pair from the platform CSPRNG.
    ///
    /// Draws 32 random bytes, reduces modulo (n−1) and adds 1 to land in
    /// [1, n−1], then derives publicKey = privateKey · G.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let n = &secp256k1().n;
        let scalar = BigUint::from_bytes_be(&bytes) % (n - BigUint::one()) + BigUint::one();
        Self::from_private(PrivateKey(scalar))
    }

    /// Build a key pair from an existing private key.
    pub fn from_private(private: PrivateKey) -> Result<Self, CryptoError> {
        let public = secp256k1().generator().scalar_mul_uint(&private.0)?;
        Ok(Self { private, public })
    }

    /// The private scalar.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// The derived public point.
    pub fn public_key(&self) -> &Point {
        &self.public
    }

    /// The public point in compressed wire form.
    pub fn public_key_compressed(&self) -> CompressedPoint {
        self.public.compress()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair(public: {:?}, <private>)", self.public.compress())
    }
}
