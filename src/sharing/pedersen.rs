//! Pedersen verifiable secret sharing.
//!
//! A second blinding polynomial of the same degree hides the secret
//! polynomial inside the commitments: `commitments[j] = coeff_j · g +
//! blind_j · h` for an independent public generator `h`. Each party receives
//! its share together with a binding scalar (the blinding polynomial at its
//! index) and checks the two-generator identity. Unlike Feldman, the
//! commitments reveal nothing about the secret even to an unbounded
//! adversary; `h` must have no known discrete log relative to `g` or the
//! binding property collapses.

use rand_core::{CryptoRng, RngCore};

use crate::arith::{Backend, GroupPoint, Polynomial, Scalar};
use crate::errors::Error;

use super::feldman::evaluate_in_exponent;
use super::{SecretShare, SharePacket, Sharing};

/// Public commitments plus one private packet per party; packets carry the
/// binding scalar.
#[derive(Clone, Debug)]
pub struct PedersenDealing<B: Backend> {
    pub packets: Vec<SharePacket<B>>,
    pub commitments: Vec<B::Point>,
}

/// Packages a sharing for Pedersen verification against the generator `h`.
pub fn create<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    sharing: &Sharing<B>,
    h: &B::Point,
) -> PedersenDealing<B> {
    let degree = sharing.threshold() as usize - 1;
    let blinding = Polynomial::<B::Scalar>::random(degree, rng);

    let mut commitments: Vec<B::Point> = sharing
        .polynomial()
        .coeffs()
        .iter()
        .map(B::Point::mul_base)
        .collect();
    // The blinding polynomial is trimmed independently; pad the shorter side.
    commitments.resize(degree + 1, B::Point::identity());
    for (commitment, blind) in commitments.iter_mut().zip(blinding.coeffs().iter()) {
        *commitment = commitment.add(&h.mul_scalar(blind));
    }

    let packets = sharing
        .secret_shares()
        .into_iter()
        .map(|share| {
            let binding = blinding.evaluate(&B::Scalar::from_u64(u64::from(share.index)));
            SharePacket {
                share,
                binding: Some(binding),
            }
        })
        .collect();

    PedersenDealing {
        packets,
        commitments,
    }
}

/// Checks `share · g + binding · h == Σ_j index^j · commitments[j]`.
pub fn verify_share<B: Backend>(
    share: &SecretShare<B>,
    binding: &B::Scalar,
    h: &B::Point,
    commitments: &[B::Point],
) -> bool {
    let lhs = B::Point::mul_base(&share.value).add(&h.mul_scalar(binding));
    lhs == evaluate_in_exponent::<B>(commitments, share.index)
}

/// [`verify_share`], raising [`Error::InvalidShare`] on mismatch.
pub fn verify_share_strict<B: Backend>(
    share: &SecretShare<B>,
    binding: &B::Scalar,
    h: &B::Point,
    commitments: &[B::Point],
) -> Result<(), Error> {
    if verify_share(share, binding, h, commitments) {
        Ok(())
    } else {
        Err(Error::InvalidShare { index: share.index })
    }
}
