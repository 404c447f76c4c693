//! # giza-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the giza authentication
//! core:
//!
//! - **Finite-field arithmetic** (`field`): modular reduction, iterative
//!   extended-Euclid inversion, and square-and-multiply exponentiation over
//!   arbitrary-precision integers.
//! - **Elliptic-curve group** (`curve`): the secp256k1 short-Weierstrass
//!   curve implemented from raw modular arithmetic — point addition,
//!   doubling, scalar multiplication, and compressed-point (de)serialization.
//! - **Key pairs** (`keys`): ephemeral private scalars in [1, n−1] with
//!   their derived public points.
//! - **Key agreement** (`ecdh`): Diffie–Hellman shared-secret computation
//!   and the one-way derivation of a 32-byte symmetric session key.
//!
//! ## Crate Policy
//!
//! - Depends only on `giza-core` internally.
//! - Private keys are never serialized or logged; `Debug` impls redact them.
//! - Curve and field arithmetic is purely functional — no shared mutable
//!   state anywhere in this crate.
//! - No `unsafe` code; no `panic!()` or `.unwrap()` outside tests.

pub mod curve;
pub mod ecdh;
pub mod field;
pub mod keys;

pub use curve::{secp256k1, CompressedPoint, CurveParams, Point, FIELD_WIDTH};
pub use ecdh::{compute_shared_secret, derive_session_key, EcdhSession, SessionKey};
pub use field::{mod_inverse, mod_pow, mod_reduce};
pub use keys::{KeyPair, PrivateKey};
