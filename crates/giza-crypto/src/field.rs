//! # Finite-Field Arithmetic
//!
//! Modular arithmetic over arbitrary-precision integers: reduction into
//! `[0, m)`, extended-Euclid inversion, and square-and-multiply
//! exponentiation. Everything here is purely functional; the curve module
//! is the only internal consumer.
//!
//! ## Design
//!
//! - `mod_reduce` accepts a signed `BigInt` because intermediate curve
//!   formulas (slopes, coordinate differences) go negative before reduction.
//! - `mod_inverse` is the iterative form of the extended Euclidean
//!   algorithm, so stack depth does not grow with operand size.
//! - `mod_pow` walks every bit of the exponent with a fixed loop structure:
//!   the multiply is computed on every iteration and the bit only selects
//!   whether it is kept. With private-scalar exponents the loop shape does
//!   not vary with the bit values.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use giza_core::CryptoError;

/// Reduce a signed integer into `[0, m)`.
///
/// The language-level `%` on `BigInt` keeps the sign of the dividend; this
/// always returns the canonical non-negative residue. The modulus must be
/// non-zero.
pub fn mod_reduce(a: &BigInt, m: &BigUint) -> BigUint {
    debug_assert!(!m.is_zero(), "modulus must be non-zero");
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r = a % &m_int;
    if r.sign() == Sign::Minus {
        r += &m_int;
    }
    r.magnitude().clone()
}

/// Compute the modular inverse of `a` modulo `m` via the iterative
/// extended Euclidean algorithm.
///
/// Fails with [`CryptoError::NoInverse`] when `gcd(a, m) != 1` — the
/// degenerate case is never papered over with a zero result.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint, CryptoError> {
    if m <= &BigUint::one() {
        return Err(CryptoError::NoInverse {
            a: a.to_string(),
            m: m.to_string(),
        });
    }

    // Invariant per iteration: a * old_s ≡ old_r (mod m).
    let mut old_r = BigInt::from_biguint(Sign::Plus, a % m);
    let mut r = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if old_r != BigInt::one() {
        return Err(CryptoError::NoInverse {
            a: a.to_string(),
            m: m.to_string(),
        });
    }
    Ok(mod_reduce(&old_s, m))
}

/// Compute `base^exp mod m` by square-and-multiply.
///
/// The loop visits every bit of `exp` up to its bit length with no early
/// exit on zero bits; the modular multiply happens each iteration and the
/// current bit only selects whether its result is retained. The modulus
/// must be non-zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    debug_assert!(!m.is_zero(), "modulus must be non-zero");
    let mut result = BigUint::one() % m;
    let mut square = base % m;
    for i in 0..exp.bits() {
        let multiplied = (&result * &square) % m;
        if exp.bit(i) {
            result = multiplied;
        }
        square = (&square * &square) % m;
    }
    result
}
