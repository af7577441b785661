//! Shamir secret sharing with verifiable-commitment variants.
//!
//! # Overview
//!
//! [`distribute`] splits a scalar secret into `n` shares such that any `t`
//! of them reconstruct it and fewer reveal nothing. The resulting
//! [`Sharing`] hands out [`SecretShare`]s for private delivery and
//! [`PublicShare`]s for advertisement, and can package either VSS variant:
//!
//! * [`feldman`] — generator commitments to the polynomial coefficients;
//!   computationally hiding, publicly verifiable.
//! * [`pedersen`] — two-generator commitments with per-share binding
//!   scalars; information-theoretically hiding.
//!
//! Indexes are nonzero `u32` values; the secret lives at x = 0, which is why
//! index zero is rejected everywhere. The party count must stay below the
//! group order, which every supported backend guarantees for `u32` indexes.
//!
//! # Example
//!
//! ```rust
//! use quorus::arith::{Backend, RistrettoBackend, Scalar};
//! use quorus::sharing::{distribute, feldman};
//!
//! type B = RistrettoBackend;
//!
//! let mut rng = rand::thread_rng();
//! let secret = <B as Backend>::Scalar::random(&mut rng);
//! let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).unwrap();
//!
//! let dealing = feldman::create(&sharing);
//! for packet in &dealing.packets {
//!     assert!(feldman::verify_share::<B>(&packet.share, &dealing.commitments));
//! }
//! ```

use rand_core::{CryptoRng, RngCore};
use tracing::instrument;

use crate::arith::{lagrange, Backend, GroupPoint, Polynomial, Scalar};
use crate::errors::Error;
use crate::sigma::proofs::{prove_dlog, verify_dlog};
use crate::sigma::{SigmaOptions, SigmaProof};

pub mod feldman;
pub mod pedersen;

/// A party's private share: the secret polynomial evaluated at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecretShare<B: Backend> {
    pub index: u32,
    pub value: B::Scalar,
}

/// The public image of a secret share, `value = share · g`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicShare<B: Backend> {
    pub index: u32,
    pub value: B::Point,
}

impl<B: Backend> SecretShare<B> {
    /// The corresponding public share.
    pub fn to_public(&self) -> PublicShare<B> {
        PublicShare {
            index: self.index,
            value: B::Point::mul_base(&self.value),
        }
    }

    /// Advertises the public share with a proof of knowledge of this share.
    pub fn prove_identity<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        options: &SigmaOptions<'_>,
    ) -> Result<PublicSharePacket<B>, Error> {
        let share = self.to_public();
        let proof = prove_dlog::<B, R>(
            rng,
            &B::Point::generator(),
            &share.value,
            &self.value,
            options,
        )?;
        Ok(PublicSharePacket { share, proof })
    }
}

/// Wire bundle for private delivery of one share.
///
/// `binding` is present only for Pedersen dealings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePacket<B: Backend> {
    pub share: SecretShare<B>,
    pub binding: Option<B::Scalar>,
}

/// Public key advertisement: a public share plus a proof that the sender
/// knows the underlying secret share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicSharePacket<B: Backend> {
    pub share: PublicShare<B>,
    pub proof: SigmaProof<B>,
}

impl<B: Backend> PublicSharePacket<B> {
    /// Verifies the identity proof.
    pub fn verify(&self, options: &SigmaOptions<'_>) -> bool {
        verify_dlog::<B>(
            &B::Point::generator(),
            &self.share.value,
            &self.proof,
            options,
        )
    }

    /// [`verify`](Self::verify), raising [`Error::InvalidProof`] on failure.
    pub fn verify_strict(&self, options: &SigmaOptions<'_>) -> Result<(), Error> {
        if self.verify(options) {
            Ok(())
        } else {
            Err(Error::InvalidProof)
        }
    }
}

/// A completed Shamir dealing over parties `1..=n`.
///
/// Holds the secret polynomial; treat the whole value as secret material.
#[derive(Clone, Debug)]
pub struct Sharing<B: Backend> {
    parties: u32,
    threshold: u32,
    polynomial: Polynomial<B::Scalar>,
}

/// Splits `secret` into `parties` shares with reconstruction threshold
/// `threshold`.
///
/// `predefined` pins the shares of specific indexes, e.g. when re-sharing an
/// existing secret to a party set that must keep its old shares. At most
/// `threshold - 1` shares may be pinned; with the secret itself that leaves
/// at least one degree of freedom, otherwise the dealing would be fully
/// determined by the caller.
#[instrument(level = "debug", skip_all, fields(parties, threshold, predefined = predefined.len()))]
pub fn distribute<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    secret: &B::Scalar,
    parties: u32,
    threshold: u32,
    predefined: &[(u32, B::Scalar)],
) -> Result<Sharing<B>, Error> {
    if threshold < 1 || threshold > parties {
        return Err(Error::InvalidConfig(format!(
            "threshold must satisfy 1 <= t <= n, got t = {threshold}, n = {parties}"
        )));
    }
    if predefined.len() >= threshold as usize {
        return Err(Error::TooManyPredefined {
            threshold,
            max: threshold - 1,
            provided: predefined.len(),
        });
    }
    for (index, _) in predefined {
        if *index == 0 || *index > parties {
            return Err(Error::InvalidConfig(format!(
                "predefined index {index} outside 1..={parties}"
            )));
        }
    }

    let polynomial = if predefined.is_empty() {
        let mut coeffs = vec![*secret];
        coeffs.extend((1..threshold).map(|_| B::Scalar::random(rng)));
        Polynomial::new(coeffs)
    } else {
        // Interpolate through x = 0, the pinned shares, and enough random
        // samples at out-of-range abscissas to reach degree t - 1.
        let mut points: Vec<(B::Scalar, B::Scalar)> = vec![(B::Scalar::zero(), *secret)];
        points.extend(
            predefined
                .iter()
                .map(|(index, value)| (B::Scalar::from_u64(u64::from(*index)), *value)),
        );
        let free = threshold as usize - 1 - predefined.len();
        points.extend((1..=free as u64).map(|offset| {
            (
                B::Scalar::from_u64(u64::from(parties) + offset),
                B::Scalar::random(rng),
            )
        }));
        lagrange::interpolate(&points)?
    };

    Ok(Sharing {
        parties,
        threshold,
        polynomial,
    })
}

impl<B: Backend> Sharing<B> {
    /// Number of shares dealt.
    pub fn parties(&self) -> u32 {
        self.parties
    }

    /// Number of shares needed to reconstruct.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The shared secret, i.e. the polynomial's constant term.
    pub fn secret(&self) -> B::Scalar {
        self.polynomial
            .coeffs()
            .first()
            .copied()
            .unwrap_or_else(B::Scalar::zero)
    }

    /// The public counterpart of the secret, `secret · g`.
    pub fn public(&self) -> B::Point {
        B::Point::mul_base(&self.secret())
    }

    pub(crate) fn polynomial(&self) -> &Polynomial<B::Scalar> {
        &self.polynomial
    }

    /// One share per index in `1..=parties`.
    pub fn secret_shares(&self) -> Vec<SecretShare<B>> {
        (1..=self.parties)
            .map(|index| self.secret_share(index))
            .collect()
    }

    /// The share of a single party.
    ///
    /// # Panics
    ///
    /// Panics if `index` is zero or exceeds the party count. Index zero is
    /// the secret itself, never a share.
    pub fn secret_share(&self, index: u32) -> SecretShare<B> {
        assert!(
            index >= 1 && index <= self.parties,
            "share index {index} outside 1..={}",
            self.parties
        );
        SecretShare {
            index,
            value: self
                .polynomial
                .evaluate(&B::Scalar::from_u64(u64::from(index))),
        }
    }

    /// The public shares of all parties.
    pub fn public_shares(&self) -> Vec<PublicShare<B>> {
        self.secret_shares()
            .iter()
            .map(SecretShare::to_public)
            .collect()
    }
}
