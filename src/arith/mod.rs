//! Group abstractions and concrete curve backends.
//!
//! This module defines the prime-order-group interface every other component
//! builds on, allowing multiple backends to provide unified scalar and point
//! arithmetic.
//!
//! # Architecture
//!
//! - **[`Scalar`]**: scalar-field operations modulo the group order
//! - **[`GroupPoint`]**: group law, inversion, scalar multiplication, encoding
//! - **[`Backend`]**: binds one scalar/point pair to a [`CurveId`] and the
//!   group order bytes used in proof transcripts
//! - **[`poly`]**: polynomial arithmetic over a backend scalar
//! - **[`lagrange`]**: Lagrange interpolation helpers
//!
//! # Backend support
//!
//! | Feature | Curve | Notes |
//! |---------|-------|-------|
//! | `ristretto` (default) | ristretto255 | prime-order by construction |
//! | `ed25519` | ed25519 | cofactor-8 curve, torsion checking enforced |
//! | `jubjub` | jubjub | prime-order subgroup |
//!
//! # Example
//!
//! ```rust
//! use quorus::arith::{Backend, GroupPoint, RistrettoBackend, Scalar};
//! use rand::thread_rng;
//!
//! type P = <RistrettoBackend as Backend>::Point;
//! type S = <RistrettoBackend as Backend>::Scalar;
//!
//! let mut rng = thread_rng();
//! let x = S::random(&mut rng);
//! let point = P::mul_base(&x);
//! assert_eq!(point.add(&point.negate()), P::identity());
//! ```

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use rand_core::{CryptoRng, RngCore};

use crate::config::{CurveId, PointPolicy, ScalarPolicy};
use crate::errors::{BackendError, Error};

#[cfg(any(feature = "ristretto", feature = "ed25519"))]
mod curve25519;
#[cfg(feature = "ed25519")]
pub use curve25519::Ed25519Backend;
#[cfg(feature = "ristretto")]
pub use curve25519::RistrettoBackend;

#[cfg(feature = "jubjub")]
mod jubjub_backend;
#[cfg(feature = "jubjub")]
pub use jubjub_backend::JubjubBackend;

pub mod lagrange;
pub mod poly;

pub use poly::Polynomial;

/// Scalar-field element abstraction.
///
/// All arithmetic is modulo the group order. Encodings are little-endian and
/// fixed-width (`Repr` is the field byte-length), and decoding enforces
/// canonicity.
pub trait Scalar:
    Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Fixed-width little-endian byte representation.
    type Repr: AsRef<[u8]> + AsMut<[u8]> + Default + Clone + Debug + Send + Sync + 'static;

    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the multiplicative identity.
    fn one() -> Self;

    /// Lifts a small integer into the field.
    fn from_u64(n: u64) -> Self;

    /// Draws a uniform scalar from a cryptographically secure source.
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self;

    /// Computes the multiplicative inverse, returning `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Reduces 64 uniform bytes into the field (hash-to-scalar).
    fn from_uniform(bytes: &[u8; 64]) -> Self;

    /// Serializes to little-endian bytes, zero-padded to the field width.
    fn to_bytes(&self) -> Self::Repr;

    /// Deserializes from little-endian bytes.
    ///
    /// Fails with [`BackendError::BadEncoding`] on a wrong length and
    /// [`BackendError::BadScalar`] on a non-canonical value.
    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError>;
}

/// Group element abstraction.
///
/// Points are opaque: they support equality but no ordering. `from_bytes`
/// ("unpack") rejects malformed encodings and points outside the prime-order
/// subgroup; it accepts a canonical identity encoding, which
/// [`validate_point`] rejects under the default policy.
pub trait GroupPoint<S: Scalar>:
    Copy + Clone + Debug + PartialEq + Eq + Send + Sync + 'static
{
    /// Canonical compressed byte representation.
    type Repr: AsRef<[u8]> + AsMut<[u8]> + Default + Clone + Debug + Send + Sync + 'static;

    /// Returns the neutral element.
    fn identity() -> Self;

    /// Returns the fixed group generator.
    fn generator() -> Self;

    /// Checks whether this point is the neutral element.
    fn is_identity(&self) -> bool;

    /// Checks membership in the prime-order subgroup.
    fn is_torsion_free(&self) -> bool;

    /// Applies the group law.
    fn add(&self, other: &Self) -> Self;

    /// Combines with the inverse of `other`.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the group inverse.
    fn negate(&self) -> Self;

    /// Scalar multiplication (exponentiation in multiplicative notation).
    fn mul_scalar(&self, scalar: &S) -> Self;

    /// Scalar multiplication of the generator.
    fn mul_base(scalar: &S) -> Self {
        Self::generator().mul_scalar(scalar)
    }

    /// Draws a uniform point of the prime-order subgroup.
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self;

    /// Serializes to the canonical compressed form.
    fn to_bytes(&self) -> Self::Repr;

    /// Deserializes from canonical bytes.
    ///
    /// Fails with [`BackendError::BadEncoding`] on malformed input and
    /// [`BackendError::BadPoint`] for well-formed encodings outside the
    /// prime-order subgroup.
    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError>;
}

/// One curve backend: a scalar/point pair plus group metadata.
///
/// A backend is a zero-sized tag selected once at startup; all other
/// components are generic over it and never copy arithmetic logic.
pub trait Backend: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Scalar field of the group order.
    type Scalar: Scalar;
    /// Prime-order group element.
    type Point: GroupPoint<Self::Scalar>;

    /// Identifies the group; two backends are the same group iff equal ids.
    const CURVE: CurveId;

    /// Group order, little-endian, fed into Fiat-Shamir transcripts.
    const ORDER_LE: &'static [u8];
}

/// Validates a point against the subgroup and the identity policy.
///
/// Fails with [`BackendError::BadPoint`] if the point carries torsion or, for
/// [`PointPolicy::RejectIdentity`], equals the neutral element.
pub fn validate_point<B: Backend>(point: &B::Point, policy: PointPolicy) -> Result<(), Error> {
    if !point.is_torsion_free() {
        return Err(BackendError::BadPoint("point outside the prime-order subgroup").into());
    }
    if policy == PointPolicy::RejectIdentity && point.is_identity() {
        return Err(BackendError::BadPoint("neutral element rejected by policy").into());
    }
    Ok(())
}

/// Validates a scalar against the range policy.
///
/// Typed scalars are reduced by construction; the remaining check is the
/// `[1, order)` restriction some call sites require.
pub fn validate_scalar<B: Backend>(scalar: &B::Scalar, policy: ScalarPolicy) -> Result<(), Error> {
    if policy == ScalarPolicy::RejectZero && *scalar == B::Scalar::zero() {
        return Err(BackendError::BadScalar("zero rejected by policy").into());
    }
    Ok(())
}
