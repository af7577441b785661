//! # Quorus: Threshold ElGamal over Prime-Order Groups
//!
//! Quorus is a cryptographic toolkit for threshold encryption: a message is
//! encrypted to a jointly held public key and can only be decrypted when at
//! least `t` of `n` share holders cooperate, each contributing a provably
//! correct partial decryptor.
//!
//! ## Overview
//!
//! The crate is built from a small set of tightly coupled pieces that share
//! one data model (group points and scalars) and one algorithmic spine
//! (Lagrange interpolation plus proofs of exponent):
//!
//! - **[`arith`]**: the abstract prime-order group interface ([`arith::Backend`],
//!   [`arith::Scalar`], [`arith::GroupPoint`]) with curve backends selected by
//!   feature flag, plus polynomial and Lagrange machinery.
//!
//! - **[`sharing`]**: Shamir secret sharing with Feldman and Pedersen
//!   verifiable-commitment variants and proof-carrying public-share packets.
//!
//! - **[`sigma`]**: a generic Sigma-protocol/Fiat-Shamir engine for linear
//!   discrete-log relations; [`sigma::proofs`] instantiates dlog, DDH,
//!   Okamoto, AND-composition, and Schnorr-signature proofs from it.
//!
//! - **[`elgamal`]**: the threshold-ElGamal family (Plain, KEM, IES) with
//!   encryption and decryptor proofs.
//!
//! - **[`combiner`]**: validation and Lagrange aggregation of partial
//!   decryptors into the decryptor that finishes decryption.
//!
//! - **[`config`]** and [`errors`]: closed configuration enums and the
//!   crate-wide error types.
//!
//! ## Quick Example
//!
//! ```rust
//! use quorus::arith::{Backend, RistrettoBackend, Scalar};
//! use quorus::elgamal::{encrypt, Scheme};
//! use quorus::sharing::distribute;
//! use quorus::sigma::SigmaOptions;
//! use quorus::combiner;
//!
//! type B = RistrettoBackend;
//!
//! # fn main() -> Result<(), quorus::Error> {
//! let mut rng = rand::thread_rng();
//!
//! // Deal a 3-of-5 sharing of a fresh key.
//! let secret = <B as Backend>::Scalar::random(&mut rng);
//! let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[])?;
//!
//! // Anyone can encrypt to the joint public key.
//! let output = encrypt::<B, _>(&mut rng, Scheme::Kem, b"for the quorum", &sharing.public())?;
//!
//! // Three share holders respond with proof-carrying partial decryptors.
//! let options = SigmaOptions::default();
//! let partials: Vec<_> = sharing.secret_shares()[..3]
//!     .iter()
//!     .map(|share| {
//!         combiner::create_partial_decryptor(&mut rng, &output.ciphertext, share, &options)
//!     })
//!     .collect::<Result<_, _>>()?;
//!
//! // The combiner validates all of them, then decrypts.
//! let report = combiner::validate_partial_decryptors(
//!     &output.ciphertext,
//!     &sharing.public_shares(),
//!     &partials,
//!     Some(3),
//!     &options,
//! )?;
//! assert!(report.all_valid);
//!
//! let plaintext = combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3))?;
//! assert_eq!(plaintext, b"for the quorum");
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! Curve backends are selected by feature flag:
//!
//! - **`ristretto`** (default): ristretto255 over curve25519
//! - **`ed25519`**: the prime-order subgroup of edwards25519, with torsion
//!   checks on decode
//! - **`jubjub`**: the jubjub prime subgroup via the `ff`/`group` stack
//!
//! ## Security Considerations
//!
//! - **Threshold security**: the scheme is secure as long as fewer than `t`
//!   share holders are compromised.
//! - **Randomness**: all randomness must come from a CSPRNG. Reusing an
//!   encryption randomness scalar across two ciphertexts under the same key
//!   is a caller error this crate does not detect.
//! - **Pedersen generators**: the second generator `h` must have no known
//!   discrete log relative to the group generator.
//! - **Verification contract**: proof verification returns `bool` and never
//!   raises; the `*_strict` variants raise named errors for callers that
//!   must abort on failure.

pub mod arith;
pub mod combiner;
pub mod config;
pub mod elgamal;
pub mod errors;
pub mod sharing;
pub mod sigma;

mod serde_impl;

pub use config::{CurveId, HashAlgorithm, PointPolicy, ScalarPolicy};
pub use errors::{BackendError, Error};
