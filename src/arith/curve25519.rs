//! curve25519-backed implementations: ristretto255 and ed25519.
//!
//! Both backends share the scalar field of order ℓ = 2^252 + 27742317777372353535851937790883648493.
//! The ristretto255 group is prime-order by construction, so its `from_bytes`
//! can never observe torsion; the ed25519 backend sits on a cofactor-8 curve
//! and therefore rejects encodings of points outside the ℓ-order subgroup
//! (small-order and mixed-order points).

use curve25519_dalek::constants::{ED25519_BASEPOINT_POINT, RISTRETTO_BASEPOINT_POINT};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar as Curve25519Scalar;
use curve25519_dalek::traits::Identity;
use rand_core::{CryptoRng, RngCore};

use crate::config::CurveId;
use crate::errors::BackendError;

use super::{Backend, GroupPoint, Scalar};

/// ℓ, the order of the ristretto255 group and of the ed25519 prime subgroup,
/// little-endian.
const CURVE25519_ORDER_LE: &[u8] = &[
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

impl Scalar for Curve25519Scalar {
    type Repr = [u8; 32];

    fn zero() -> Self {
        Curve25519Scalar::ZERO
    }

    fn one() -> Self {
        Curve25519Scalar::ONE
    }

    fn from_u64(n: u64) -> Self {
        Curve25519Scalar::from(n)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Curve25519Scalar::random(rng)
    }

    fn invert(&self) -> Option<Self> {
        if *self == Curve25519Scalar::ZERO {
            None
        } else {
            Some(Curve25519Scalar::invert(self))
        }
    }

    fn from_uniform(bytes: &[u8; 64]) -> Self {
        Curve25519Scalar::from_bytes_mod_order_wide(bytes)
    }

    fn to_bytes(&self) -> Self::Repr {
        Curve25519Scalar::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BackendError::BadEncoding("scalar must be 32 bytes"))?;
        Option::<Curve25519Scalar>::from(Curve25519Scalar::from_canonical_bytes(array))
            .ok_or(BackendError::BadScalar("scalar not reduced modulo the group order"))
    }
}

#[cfg(feature = "ristretto")]
impl GroupPoint<Curve25519Scalar> for RistrettoPoint {
    type Repr = [u8; 32];

    fn identity() -> Self {
        <RistrettoPoint as Identity>::identity()
    }

    fn generator() -> Self {
        RISTRETTO_BASEPOINT_POINT
    }

    fn is_identity(&self) -> bool {
        *self == <RistrettoPoint as Identity>::identity()
    }

    fn is_torsion_free(&self) -> bool {
        // ristretto255 is the cofactor-cleared quotient group.
        true
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Curve25519Scalar) -> Self {
        self * scalar
    }

    fn mul_base(scalar: &Curve25519Scalar) -> Self {
        RistrettoPoint::mul_base(scalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        RistrettoPoint::random(rng)
    }

    fn to_bytes(&self) -> Self::Repr {
        self.compress().to_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let compressed = CompressedRistretto::from_slice(bytes)
            .map_err(|_| BackendError::BadEncoding("point must be 32 bytes"))?;
        compressed
            .decompress()
            .ok_or(BackendError::BadEncoding("not a canonical ristretto255 encoding"))
    }
}

#[cfg(feature = "ed25519")]
impl GroupPoint<Curve25519Scalar> for EdwardsPoint {
    type Repr = [u8; 32];

    fn identity() -> Self {
        <EdwardsPoint as Identity>::identity()
    }

    fn generator() -> Self {
        ED25519_BASEPOINT_POINT
    }

    fn is_identity(&self) -> bool {
        *self == <EdwardsPoint as Identity>::identity()
    }

    fn is_torsion_free(&self) -> bool {
        EdwardsPoint::is_torsion_free(self)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Curve25519Scalar) -> Self {
        self * scalar
    }

    fn mul_base(scalar: &Curve25519Scalar) -> Self {
        EdwardsPoint::mul_base(scalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        EdwardsPoint::mul_base(&Curve25519Scalar::random(rng))
    }

    fn to_bytes(&self) -> Self::Repr {
        self.compress().to_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let compressed = CompressedEdwardsY::from_slice(bytes)
            .map_err(|_| BackendError::BadEncoding("point must be 32 bytes"))?;
        let point = compressed
            .decompress()
            .ok_or(BackendError::BadEncoding("not a canonical ed25519 encoding"))?;
        if !point.is_torsion_free() {
            return Err(BackendError::BadPoint("ed25519 point carries torsion"));
        }
        Ok(point)
    }
}

/// ristretto255 backend (default).
#[cfg(feature = "ristretto")]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RistrettoBackend;

#[cfg(feature = "ristretto")]
impl Backend for RistrettoBackend {
    type Scalar = Curve25519Scalar;
    type Point = RistrettoPoint;

    const CURVE: CurveId = CurveId::Ristretto255;
    const ORDER_LE: &'static [u8] = CURVE25519_ORDER_LE;
}

/// ed25519 backend over the prime-order subgroup of curve25519.
#[cfg(feature = "ed25519")]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Ed25519Backend;

#[cfg(feature = "ed25519")]
impl Backend for Ed25519Backend {
    type Scalar = Curve25519Scalar;
    type Point = EdwardsPoint;

    const CURVE: CurveId = CurveId::Ed25519;
    const ORDER_LE: &'static [u8] = CURVE25519_ORDER_LE;
}
