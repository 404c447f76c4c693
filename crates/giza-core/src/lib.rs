//! # giza-core — Foundational Types for the giza Authentication Core
//!
//! This crate is the bedrock of the giza stack. It defines the shared
//! primitives every other crate builds on. Every other crate in the
//! workspace depends on `giza-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `SessionId` is a newtype
//!    over a v4 UUID — no bare strings for session correlation.
//!
//! 2. **One error enum per concern.** `CryptoError`, `GraphError`, and
//!    `SessionError` are distinct types; a field-arithmetic failure cannot
//!    be confused with a session-store miss.
//!
//! 3. **Fixed-width hex everywhere.** All field elements and digests cross
//!    module boundaries as fixed-width big-endian byte strings or their hex
//!    renderings, so commitment hashes are reproducible across platforms.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `giza-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod hex;
pub mod session_id;

pub use error::{CryptoError, GraphError, SessionError};
pub use hex::{decode_hex, decode_hex_exact, encode_hex};
pub use session_id::SessionId;
