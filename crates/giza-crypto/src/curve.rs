//! # secp256k1 Elliptic-Curve Group
//!
//! The fixed prime-field short-Weierstrass curve y² = x³ + 7 over
//! F_p, implemented from raw modular arithmetic on top of the `field`
//! module. Provides the point type, group law, scalar multiplication, and
//! the compressed wire encoding.
//!
//! ## Security Invariant
//!
//! A non-identity [`Point`] must satisfy the curve equation before being
//! trusted as a public key — [`Point::decompress`] enforces the implicit
//! quadratic-residue check, and callers accepting externally supplied
//! points verify [`Point::is_on_curve`] before any scalar multiplication.
//! The curve has cofactor 1, so there is no small-order subgroup to guard
//! against; callers requiring explicit subgroup assurance can additionally
//! verify that n·P is the identity.
//!
//! ## Encoding
//!
//! Compressed points are 1 parity byte (`0x02` even y, `0x03` odd y)
//! followed by the 32-byte big-endian x-coordinate, or the single sentinel
//! byte `0x00` for the identity. X-coordinates are always padded to the
//! full field width so commitment hashes stay reproducible across
//! platforms.

use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use giza_core::{decode_hex, encode_hex, CryptoError};

use crate::field::{mod_inverse, mod_pow, mod_reduce};

/// Width in bytes of a serialized field element.
pub const FIELD_WIDTH: usize = 32;

/// The single-byte wire sentinel for the point at infinity.
pub const IDENTITY_SENTINEL: u8 = 0x00;

// ---------------------------------------------------------------------------
// Curve parameters
// ---------------------------------------------------------------------------

/// The fixed constants of the secp256k1 curve.
///
/// Immutable and process-wide; obtained through [`secp256k1()`], never
/// constructed by callers.
#[derive(Debug, Clone)]
pub struct CurveParams {
    /// The prime field modulus p = 2²⁵⁶ − 2³² − 977.
    pub p: BigUint,
    /// Weierstrass coefficient a (zero for secp256k1).
    pub a: BigUint,
    /// Weierstrass coefficient b (seven for secp256k1).
    pub b: BigUint,
    /// x-coordinate of the generator G.
    pub gx: BigUint,
    /// y-coordinate of the generator G.
    pub gy: BigUint,
    /// The prime order n of the group generated by G.
    pub n: BigUint,
    /// The cofactor h (one for secp256k1).
    pub h: BigUint,
}

impl CurveParams {
    /// The generator point G.
    pub fn generator(&self) -> Point {
        Point::Affine {
            x: self.gx.clone(),
            y: self.gy.clone(),
        }
    }
}

const ORDER_N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

const GEN_X: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

const GEN_Y: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65,
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

/// The process-wide secp256k1 parameters.
pub fn secp256k1() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        p: (BigUint::one() << 256u32) - (BigUint::one() << 32u32) - BigUint::from(977u32),
        a: BigUint::zero(),
        b: BigUint::from(7u32),
        gx: BigUint::from_bytes_be(&GEN_X),
        gy: BigUint::from_bytes_be(&GEN_Y),
        n: BigUint::from_bytes_be(&ORDER_N),
        h: BigUint::one(),
    })
}

/// Encode a field element as a fixed-width big-endian byte string.
///
/// Always pads to [`FIELD_WIDTH`] bytes; every serialized x-coordinate and
/// shared secret in the system goes through this so hashes over them are
/// platform-independent.
pub fn field_bytes(x: &BigUint) -> [u8; FIELD_WIDTH] {
    let raw = x.to_bytes_be();
    let mut out = [0u8; FIELD_WIDTH];
    let start = FIELD_WIDTH.saturating_sub(raw.len());
    out[start..].copy_from_slice(&raw[raw.len().saturating_sub(FIELD_WIDTH)..]);
    out
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A point on the curve: the identity ("point at infinity") or an affine
/// (x, y) pair of field elements. Value type, freely cloned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity — the additive unit of the group.
    Infinity,
    /// An affine point with coordinates in F_p.
    Affine {
        /// x-coordinate.
        x: BigUint,
        /// y-coordinate.
        y: BigUint,
    },
}

impl Point {
    /// Whether this point satisfies the curve equation.
    ///
    /// True for the identity; otherwise checks y² ≡ x³ + 7 (mod p).
    pub fn is_on_curve(&self) -> bool {
        let params = secp256k1();
        match self {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                if x >= &params.p || y >= &params.p {
                    return false;
                }
                let lhs = (y * y) % &params.p;
                let rhs = (x * x * x + &params.b) % &params.p;
                lhs == rhs
            }
        }
    }

    /// The additive inverse: identity maps to itself, otherwise
    /// (x, p − y mod p).
    pub fn negate(&self) -> Point {
        let params = secp256k1();
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: (&params.p - y) % &params.p,
            },
        }
    }

    /// Group addition.
    ///
    /// The identity is the additive unit. Inverse pairs (same x, y-sum
    /// ≡ 0 mod p) yield the identity, which also covers doubling a
    /// 2-torsion point (y = 0). Otherwise the tangent slope is used for
    /// doubling and the secant slope for distinct points.
    pub fn add(&self, other: &Point) -> Result<Point, CryptoError> {
        let params = secp256k1();
        let (x1, y1, x2, y2) = match (self, other) {
            (Point::Infinity, _) => return Ok(other.clone()),
            (_, Point::Infinity) => return Ok(self.clone()),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        if x1 == x2 && (y1 + y2) % &params.p == BigUint::zero() {
            return Ok(Point::Infinity);
        }

        let slope = if x1 == x2 {
            // Tangent: s = 3x² / 2y mod p.
            let numerator = (BigUint::from(3u32) * x1 * x1) % &params.p;
            let denominator = (BigUint::from(2u32) * y1) % &params.p;
            (numerator * mod_inverse(&denominator, &params.p)?) % &params.p
        } else {
            // Secant: s = (y₂ − y₁) / (x₂ − x₁) mod p.
            let numerator = mod_reduce(
                &(BigInt::from_biguint(Sign::Plus, y2.clone())
                    - BigInt::from_biguint(Sign::Plus, y1.clone())),
                &params.p,
            );
            let denominator = mod_reduce(
                &(BigInt::from_biguint(Sign::Plus, x2.clone())
                    - BigInt::from_biguint(Sign::Plus, x1.clone())),
                &params.p,
            );
            (numerator * mod_inverse(&denominator, &params.p)?) % &params.p
        };

        let slope_int = BigInt::from_biguint(Sign::Plus, slope);
        let x1_int = BigInt::from_biguint(Sign::Plus, x1.clone());
        let y1_int = BigInt::from_biguint(Sign::Plus, y1.clone());
        let x2_int = BigInt::from_biguint(Sign::Plus, x2.clone());

        let x3 = mod_reduce(&(&slope_int * &slope_int - &x1_int - &x2_int), &params.p);
        let x3_int = BigInt::from_biguint(Sign::Plus, x3.clone());
        let y3 = mod_reduce(&(&slope_int * (&x1_int - &x3_int) - &y1_int), &params.p);

        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Point doubling — addition of a point with itself.
    pub fn double(&self) -> Result<Point, CryptoError> {
        self.add(self)
    }

    /// Scalar multiplication by double-and-add, low bit first.
    ///
    /// The running result starts at the identity; the addend is doubled
    /// each iteration and added when the current low bit of `k` is set.
    /// Negative `k` negates the point and uses |k|; `k = 0` yields the
    /// identity.
    pub fn scalar_mul(&self, k: &BigInt) -> Result<Point, CryptoError> {
        let base = if k.sign() == Sign::Minus {
            self.negate()
        } else {
            self.clone()
        };
        let magnitude = k.magnitude();

        let mut result = Point::Infinity;
        let mut addend = base;
        for i in 0..magnitude.bits() {
            if magnitude.bit(i) {
                result = result.add(&addend)?;
            }
            addend = addend.double()?;
        }
        Ok(result)
    }

    /// Scalar multiplication by an unsigned scalar.
    pub fn scalar_mul_uint(&self, k: &BigUint) -> Result<Point, CryptoError> {
        self.scalar_mul(&BigInt::from_biguint(Sign::Plus, k.clone()))
    }

    /// Compress to the wire encoding: sentinel byte for the identity,
    /// otherwise parity byte plus fixed-width big-endian x-coordinate.
    pub fn compress(&self) -> CompressedPoint {
        match self {
            Point::Infinity => CompressedPoint(vec![IDENTITY_SENTINEL]),
            Point::Affine { x, y } => {
                let mut bytes = Vec::with_capacity(1 + FIELD_WIDTH);
                bytes.push(if y.bit(0) { 0x03 } else { 0x02 });
                bytes.extend_from_slice(&field_bytes(x));
                CompressedPoint(bytes)
            }
        }
    }

    /// Decompress a wire encoding back into a point.
    ///
    /// Recovers y via y² = x³ + 7 mod p and y = (y²)^((p+1)/4) mod p —
    /// valid because p ≡ 3 (mod 4) — then flips the sign to match the
    /// requested parity. Rejects x-coordinates with no square root on the
    /// curve ([`CryptoError::InvalidInput`]).
    pub fn decompress(encoded: &CompressedPoint) -> Result<Point, CryptoError> {
        let params = secp256k1();
        let bytes = encoded.as_bytes();

        if bytes == [IDENTITY_SENTINEL] {
            return Ok(Point::Infinity);
        }
        if bytes.len() != 1 + FIELD_WIDTH {
            return Err(CryptoError::InvalidInput(format!(
                "compressed point must be 1 or {} bytes, got {}",
                1 + FIELD_WIDTH,
                bytes.len()
            )));
        }
        let parity = bytes[0];
        if parity != 0x02 && parity != 0x03 {
            return Err(CryptoError::InvalidInput(format!(
                "unknown compressed-point prefix 0x{parity:02x}"
            )));
        }

        let x = BigUint::from_bytes_be(&bytes[1..]);
        if x >= params.p {
            return Err(CryptoError::InvalidInput(
                "x-coordinate exceeds the field modulus".to_string(),
            ));
        }

        let y_squared = (&x * &x * &x + &params.b) % &params.p;
        let sqrt_exp = (&params.p + BigUint::one()) >> 2u32;
        let mut y = mod_pow(&y_squared, &sqrt_exp, &params.p);

        if (&y * &y) % &params.p != y_squared {
            return Err(CryptoError::InvalidInput(
                "x-coordinate is not on the curve".to_string(),
            ));
        }

        let want_odd = parity == 0x03;
        if y.is_zero() && want_odd {
            return Err(CryptoError::InvalidInput(
                "no odd square root for y = 0".to_string(),
            ));
        }
        if y.bit(0) != want_odd {
            y = &params.p - y;
        }

        Ok(Point::Affine { x, y })
    }
}

// ---------------------------------------------------------------------------
// CompressedPoint
// ---------------------------------------------------------------------------

/// The compressed wire encoding of a curve point.
///
/// Either a single sentinel byte (identity) or 33 bytes of parity + x.
/// Serializes as a lowercase hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CompressedPoint(Vec<u8>);

impl CompressedPoint {
    /// Validate raw bytes as a compressed-point encoding.
    ///
    /// Accepts the identity sentinel or a parity byte plus full-width
    /// x-coordinate. Curve membership is checked at decompression, not
    /// here.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CryptoError> {
        match bytes.as_slice() {
            [IDENTITY_SENTINEL] => Ok(Self(bytes)),
            [0x02 | 0x03, rest @ ..] if rest.len() == FIELD_WIDTH => Ok(Self(bytes)),
            _ => Err(CryptoError::InvalidInput(format!(
                "malformed compressed point ({} bytes)",
                bytes.len()
            ))),
        }
    }

    /// The raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = decode_hex(hex).map_err(CryptoError::InvalidInput)?;
        Self::from_bytes(bytes)
    }
}

impl Serialize for CompressedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CompressedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for CompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "CompressedPoint({prefix}...)")
    }
}

impl std::fmt::Display for CompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
