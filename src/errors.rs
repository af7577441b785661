//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by concrete curve
//! backends (ristretto255, ed25519, jubjub) as well as the high-level
//! protocol-facing `Error` type used across the crate.
//!
//! The errors are implemented with `thiserror` so they are easy to convert
//! and debug in higher-level code.
//!
//! Pure verification functions (`verify*`) return booleans and never raise on
//! a failed cryptographic check; the variants below cover precondition
//! violations, malformed inputs, and the opt-in "raise on invalid" wrappers.

use thiserror::Error;

/// Errors bubbled up from curve backend implementations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("malformed encoding: {0}")]
    BadEncoding(&'static str),
    #[error("invalid point: {0}")]
    BadPoint(&'static str),
    #[error("invalid scalar: {0}")]
    BadScalar(&'static str),
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
}

/// High-level errors returned by the sharing, proof, and encryption APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("interpolation error: {0}")]
    Interpolation(&'static str),
    #[error("share {index} does not match its commitments")]
    InvalidShare { index: u32 },
    #[error("proof verification failed")]
    InvalidProof,
    #[error("message authentication failed")]
    InvalidMac,
    #[error("partial decryptor {index} failed validation")]
    InvalidPartialDecryptor { index: u32 },
    #[error("insufficient shares: required {required}, provided {provided}")]
    InsufficientShares { required: usize, provided: usize },
    #[error("too many predefined shares: threshold {threshold} admits at most {max}, got {provided}")]
    TooManyPredefined {
        threshold: u32,
        max: u32,
        provided: usize,
    },
    #[error("symmetric cipher failure: {0}")]
    Symmetric(&'static str),
}
