//! Threshold decryption: validating and aggregating partial decryptors.
//!
//! # Overview
//!
//! A decryption session collects one [`PartialDecryptor`] per cooperating
//! share holder, validates each against its public share and the ciphertext,
//! Lagrange-reconstructs the decryptor in the exponent, and hands the result
//! to the matching [ElGamal scheme](crate::elgamal). Session state lives
//! entirely with the caller; every function here is pure modulo RNG draws.
//!
//! Validation never aborts on the first bad contribution. The
//! [`ValidationReport`] names every invalid index so a coordinator can evict
//! all misbehaving parties in one round instead of one per retry.
//!
//! # Example
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
//! let mut rng = rand::thread_rng();
//! let secret = <B as Backend>::Scalar::random(&mut rng);
//! let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).unwrap();
//! let output = encrypt::<B, _>(&mut rng, Scheme::Kem, b"quorum only", &sharing.public()).unwrap();
//!
//! let options = SigmaOptions::default();
//! let partials: Vec<_> = sharing.secret_shares()[..3]
//!     .iter()
//!     .map(|share| {
//!         combiner::create_partial_decryptor(&mut rng, &output.ciphertext, share, &options)
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let report = combiner::validate_partial_decryptors(
//!     &output.ciphertext,
//!     &sharing.public_shares(),
//!     &partials,
//!     Some(3),
//!     &options,
//! )
//! .unwrap();
//! assert!(report.all_valid);
//!
//! let plaintext = combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3)).unwrap();
//! assert_eq!(plaintext, b"quorum only");
//! ```

use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::instrument;

use crate::arith::{lagrange, Backend, GroupPoint, Scalar};
use crate::elgamal::{decrypt_with_decryptor, ElGamalCiphertext};
use crate::errors::Error;
use crate::sharing::{PublicShare, SecretShare};
use crate::sigma::proofs::{prove_ddh, verify_ddh};
use crate::sigma::{SigmaOptions, SigmaProof};

/// One party's contribution to a ciphertext's decryptor, with a proof that
/// it was derived from that party's share. Never reused across ciphertexts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialDecryptor<B: Backend> {
    pub index: u32,
    /// `share · beta`.
    pub value: B::Point,
    /// DDH proof tying `value` and the party's public share to one witness.
    pub proof: SigmaProof<B>,
}

/// Outcome of batch validation; `invalid_indexes` is exhaustive and ordered
/// as the partials were supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub all_valid: bool,
    pub invalid_indexes: Vec<u32>,
}

/// Produces this share holder's partial decryptor for `ciphertext`.
pub fn create_partial_decryptor<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    ciphertext: &ElGamalCiphertext<B>,
    share: &SecretShare<B>,
    options: &SigmaOptions<'_>,
) -> Result<PartialDecryptor<B>, Error> {
    let beta = ciphertext.beta();
    let value = beta.mul_scalar(&share.value);
    let proof = prove_ddh::<B, R>(
        rng,
        beta,
        &value,
        &B::Point::mul_base(&share.value),
        &share.value,
        options,
    )?;
    Ok(PartialDecryptor {
        index: share.index,
        value,
        proof,
    })
}

/// Verifies one partial decryptor against its public share.
pub fn validate_partial_decryptor<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    public_share: &PublicShare<B>,
    partial: &PartialDecryptor<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    partial.index == public_share.index
        && verify_ddh::<B>(
            ciphertext.beta(),
            &partial.value,
            &public_share.value,
            &partial.proof,
            options,
        )
}

/// [`validate_partial_decryptor`], raising
/// [`Error::InvalidPartialDecryptor`] on failure.
pub fn validate_partial_decryptor_strict<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    public_share: &PublicShare<B>,
    partial: &PartialDecryptor<B>,
    options: &SigmaOptions<'_>,
) -> Result<(), Error> {
    if validate_partial_decryptor(ciphertext, public_share, partial, options) {
        Ok(())
    } else {
        Err(Error::InvalidPartialDecryptor {
            index: partial.index,
        })
    }
}

/// Validates every partial independently and in parallel.
///
/// With `threshold = Some(t)` fewer than `t` partials fail fast with
/// [`Error::InsufficientShares`]; `None` skips the count check. A partial
/// whose index has no matching public share is reported invalid, not an
/// error. Validation itself never aborts early.
#[instrument(level = "debug", skip_all, fields(partials = partials.len(), threshold = ?threshold))]
pub fn validate_partial_decryptors<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    public_shares: &[PublicShare<B>],
    partials: &[PartialDecryptor<B>],
    threshold: Option<usize>,
    options: &SigmaOptions<'_>,
) -> Result<ValidationReport, Error> {
    if let Some(required) = threshold {
        if partials.len() < required {
            return Err(Error::InsufficientShares {
                required,
                provided: partials.len(),
            });
        }
    }

    let invalid_indexes: Vec<u32> = partials
        .par_iter()
        .filter_map(|partial| {
            let valid = public_shares
                .iter()
                .find(|share| share.index == partial.index)
                .is_some_and(|share| {
                    validate_partial_decryptor(ciphertext, share, partial, options)
                });
            (!valid).then_some(partial.index)
        })
        .collect();

    Ok(ValidationReport {
        all_valid: invalid_indexes.is_empty(),
        invalid_indexes,
    })
}

/// Lagrange-reconstructs the decryptor from validated partials.
///
/// `decryptor = Σ_i λ_i · value_i` with the weights taken at x = 0 over the
/// supplied index set. With `threshold = None` the count check is skipped;
/// too few partials then yield a well-formed but wrong decryptor, which is
/// why skipping is an explicit caller opt-in.
#[instrument(level = "debug", skip_all, fields(partials = partials.len(), threshold = ?threshold))]
pub fn reconstruct_decryptor<B: Backend>(
    partials: &[PartialDecryptor<B>],
    threshold: Option<usize>,
) -> Result<B::Point, Error> {
    ensure_quorum(partials.len(), threshold)?;
    let xs: Vec<B::Scalar> = partials
        .iter()
        .map(|partial| B::Scalar::from_u64(u64::from(partial.index)))
        .collect();
    let weights = lagrange::coefficients(&xs, &B::Scalar::zero())?;
    Ok(partials
        .iter()
        .zip(weights.iter())
        .fold(B::Point::identity(), |acc, (partial, weight)| {
            acc.add(&partial.value.mul_scalar(weight))
        }))
}

/// Recovers the private key from secret shares, e.g. for custody recovery.
pub fn reconstruct_key<B: Backend>(
    shares: &[SecretShare<B>],
    threshold: Option<usize>,
) -> Result<B::Scalar, Error> {
    ensure_quorum(shares.len(), threshold)?;
    let points: Vec<(B::Scalar, B::Scalar)> = shares
        .iter()
        .map(|share| (B::Scalar::from_u64(u64::from(share.index)), share.value))
        .collect();
    lagrange::interpolate_at(&points, &B::Scalar::zero())
}

/// Recovers the public key from public shares.
pub fn reconstruct_public<B: Backend>(
    shares: &[PublicShare<B>],
    threshold: Option<usize>,
) -> Result<B::Point, Error> {
    ensure_quorum(shares.len(), threshold)?;
    let xs: Vec<B::Scalar> = shares
        .iter()
        .map(|share| B::Scalar::from_u64(u64::from(share.index)))
        .collect();
    let weights = lagrange::coefficients(&xs, &B::Scalar::zero())?;
    Ok(shares
        .iter()
        .zip(weights.iter())
        .fold(B::Point::identity(), |acc, (share, weight)| {
            acc.add(&share.value.mul_scalar(weight))
        }))
}

/// Reconstructs the decryptor and finishes decryption under the ciphertext's
/// own scheme.
#[instrument(level = "debug", skip_all, fields(scheme = ?ciphertext.scheme()))]
pub fn decrypt<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    partials: &[PartialDecryptor<B>],
    threshold: Option<usize>,
) -> Result<Vec<u8>, Error> {
    let decryptor = reconstruct_decryptor(partials, threshold)?;
    decrypt_with_decryptor(ciphertext, &decryptor)
}

fn ensure_quorum(provided: usize, threshold: Option<usize>) -> Result<(), Error> {
    match threshold {
        Some(required) if provided < required => Err(Error::InsufficientShares {
            required,
            provided,
        }),
        _ => Ok(()),
    }
}
