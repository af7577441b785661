//! jubjub-backed implementation over the prime-order subgroup.
//!
//! Uses the zcash `jubjub` crate through the `ff`/`group` trait stack.
//! `SubgroupPoint` encodings decode only to prime-order points, so decoding
//! doubles as subgroup validation.

use ff::Field;
use group::{Group, GroupEncoding};
use jubjub::{Fr, SubgroupPoint};
use rand_core::{CryptoRng, RngCore};

use crate::config::CurveId;
use crate::errors::BackendError;

use super::{Backend, GroupPoint, Scalar};

/// Order of the jubjub prime subgroup, little-endian.
const JUBJUB_ORDER_LE: &[u8] = &[
    0xb7, 0x2c, 0xf7, 0xd6, 0x5e, 0x0e, 0x97, 0xd0, 0x82, 0x10, 0xc8, 0xcc, 0x93, 0x20, 0x68,
    0xa6, 0x00, 0x3b, 0x34, 0x01, 0x01, 0x3b, 0x67, 0x06, 0xa9, 0xaf, 0x33, 0x65, 0xea, 0xb4,
    0x7d, 0x0e,
];

impl Scalar for Fr {
    type Repr = [u8; 32];

    fn zero() -> Self {
        <Fr as Field>::ZERO
    }

    fn one() -> Self {
        <Fr as Field>::ONE
    }

    fn from_u64(n: u64) -> Self {
        Fr::from(n)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        <Fr as Field>::random(&mut *rng)
    }

    fn invert(&self) -> Option<Self> {
        Option::from(Field::invert(self))
    }

    fn from_uniform(bytes: &[u8; 64]) -> Self {
        Fr::from_bytes_wide(bytes)
    }

    fn to_bytes(&self) -> Self::Repr {
        Fr::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BackendError::BadEncoding("scalar must be 32 bytes"))?;
        Option::<Fr>::from(Fr::from_bytes(&array))
            .ok_or(BackendError::BadScalar("scalar not reduced modulo the group order"))
    }
}

impl GroupPoint<Fr> for SubgroupPoint {
    type Repr = [u8; 32];

    fn identity() -> Self {
        <SubgroupPoint as Group>::identity()
    }

    fn generator() -> Self {
        <SubgroupPoint as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        bool::from(Group::is_identity(self))
    }

    fn is_torsion_free(&self) -> bool {
        // SubgroupPoint values are prime-order by type.
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

    fn mul_scalar(&self, scalar: &Fr) -> Self {
        self * scalar
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        <SubgroupPoint as Group>::random(&mut *rng)
    }

    fn to_bytes(&self) -> Self::Repr {
        GroupEncoding::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BackendError::BadEncoding("point must be 32 bytes"))?;
        Option::<SubgroupPoint>::from(<SubgroupPoint as GroupEncoding>::from_bytes(&array))
            .ok_or(BackendError::BadEncoding("not a canonical jubjub subgroup encoding"))
    }
}

/// jubjub backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JubjubBackend;

impl Backend for JubjubBackend {
    type Scalar = Fr;
    type Point = SubgroupPoint;

    const CURVE: CurveId = CurveId::Jubjub;
    const ORDER_LE: &'static [u8] = JUBJUB_ORDER_LE;
}
