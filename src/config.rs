//! Configuration enums for curve, hash, and validation policy selection.
//!
//! All selections are closed enums passed explicitly through function
//! parameters; there is no global mutable state. Compile-time defaults are
//! provided via `Default` impls (blake3 challenges, identity rejection).
//!
//! # Example
//!
//! ```rust
//! use quorus::{CurveId, HashAlgorithm};
//!
//! let curve = CurveId::Ristretto255;
//! assert!(curve.ensure_enabled().is_ok());
//! assert_eq!(HashAlgorithm::default(), HashAlgorithm::Blake3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::BackendError;

/// Supported prime-order groups.
///
/// Two backend instances describe the same group iff they carry the same
/// `CurveId`; no other component depends on a concrete backend type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// ristretto255 over curve25519 (prime-order by construction).
    Ristretto255,
    /// ed25519 Edwards points restricted to the prime-order subgroup.
    Ed25519,
    /// jubjub prime-order subgroup.
    Jubjub,
}

impl CurveId {
    /// Stable name fed into proof transcripts and wire formats.
    pub fn name(&self) -> &'static str {
        match self {
            CurveId::Ristretto255 => "ristretto255",
            CurveId::Ed25519 => "ed25519",
            CurveId::Jubjub => "jubjub",
        }
    }

    /// Validates that the backend for this curve was compiled in.
    pub fn ensure_enabled(&self) -> Result<(), BackendError> {
        match self {
            CurveId::Ristretto255 => {
                if cfg!(feature = "ristretto") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with the `ristretto` feature to use ristretto255",
                    ))
                }
            }
            CurveId::Ed25519 => {
                if cfg!(feature = "ed25519") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with the `ed25519` feature to use ed25519",
                    ))
                }
            }
            CurveId::Jubjub => {
                if cfg!(feature = "jubjub") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with the `jubjub` feature to use jubjub",
                    ))
                }
            }
        }
    }
}

/// Hash function used to derive Fiat-Shamir challenges.
///
/// The chosen algorithm is recorded inside every proof and is itself part of
/// the challenge transcript, so a tampered algorithm tag fails verification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// blake3 in XOF mode (default).
    #[default]
    Blake3,
    /// SHA-256, widened to 64 bytes via counter-separated digests.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Stable name fed into proof transcripts and wire formats.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

/// Policy applied by [`validate_point`](crate::arith::validate_point).
///
/// Decoding (`GroupPoint::from_bytes`) accepts a canonical identity encoding;
/// validation rejects the identity unless the caller opts out. Public keys,
/// commitments, and decryptor shares should never be the neutral element.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum PointPolicy {
    /// Reject the neutral element (default).
    #[default]
    RejectIdentity,
    /// Accept the neutral element.
    AllowIdentity,
}

/// Policy applied by [`validate_scalar`](crate::arith::validate_scalar).
///
/// Typed scalars are reduced modulo the group order by construction, so the
/// only range decision left to a call site is whether zero is acceptable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum ScalarPolicy {
    /// Accept any scalar in `[0, order)` (default).
    #[default]
    AllowZero,
    /// Require a scalar in `[1, order)`.
    RejectZero,
}
