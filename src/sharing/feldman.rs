//! Feldman verifiable secret sharing.
//!
//! The dealer publishes `commitments[j] = coeff_j · g` for every coefficient
//! of the secret polynomial. Any party can then check its private share
//! against the public commitments: the committed polynomial evaluated in the
//! exponent at the party's index must equal `share · g`. Hiding is
//! computational (the secret's commitment is its public key).

use crate::arith::{Backend, GroupPoint, Scalar};
use crate::errors::Error;

use super::{SecretShare, SharePacket, Sharing};

/// Public commitments plus one private packet per party.
#[derive(Clone, Debug)]
pub struct FeldmanDealing<B: Backend> {
    pub packets: Vec<SharePacket<B>>,
    pub commitments: Vec<B::Point>,
}

/// Packages a sharing for Feldman verification.
pub fn create<B: Backend>(sharing: &Sharing<B>) -> FeldmanDealing<B> {
    let commitments = sharing
        .polynomial()
        .coeffs()
        .iter()
        .map(B::Point::mul_base)
        .collect();
    let packets = sharing
        .secret_shares()
        .into_iter()
        .map(|share| SharePacket {
            share,
            binding: None,
        })
        .collect();
    FeldmanDealing {
        packets,
        commitments,
    }
}

/// Checks `share · g == Σ_j index^j · commitments[j]`.
pub fn verify_share<B: Backend>(share: &SecretShare<B>, commitments: &[B::Point]) -> bool {
    B::Point::mul_base(&share.value) == evaluate_in_exponent::<B>(commitments, share.index)
}

/// [`verify_share`], raising [`Error::InvalidShare`] on mismatch.
pub fn verify_share_strict<B: Backend>(
    share: &SecretShare<B>,
    commitments: &[B::Point],
) -> Result<(), Error> {
    if verify_share(share, commitments) {
        Ok(())
    } else {
        Err(Error::InvalidShare { index: share.index })
    }
}

/// Horner evaluation of the committed polynomial at `index`, in the exponent.
pub(super) fn evaluate_in_exponent<B: Backend>(commitments: &[B::Point], index: u32) -> B::Point {
    let x = B::Scalar::from_u64(u64::from(index));
    commitments
        .iter()
        .rev()
        .fold(B::Point::identity(), |acc, c| acc.mul_scalar(&x).add(c))
}

#[cfg(test)]
#[cfg(feature = "ristretto")]
mod tests {
    use super::*;
    use crate::arith::RistrettoBackend;
    use crate::sharing::distribute;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = RistrettoBackend;
    type S = <B as Backend>::Scalar;

    #[test]
    fn all_honest_shares_verify() {
        let mut rng = StdRng::seed_from_u64(71);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).expect("distribute");
        let dealing = create(&sharing);

        assert_eq!(dealing.commitments.len(), 3);
        assert_eq!(dealing.packets.len(), 5);
        for packet in &dealing.packets {
            assert!(packet.binding.is_none());
            assert!(verify_share::<B>(&packet.share, &dealing.commitments));
            verify_share_strict::<B>(&packet.share, &dealing.commitments).expect("honest share");
        }
    }

    #[test]
    fn first_commitment_is_the_public_key() {
        let mut rng = StdRng::seed_from_u64(72);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 4, 2, &[]).expect("distribute");
        let dealing = create(&sharing);
        assert_eq!(dealing.commitments[0], sharing.public());
    }

    #[test]
    fn mutated_share_is_rejected() {
        let mut rng = StdRng::seed_from_u64(73);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).expect("distribute");
        let dealing = create(&sharing);

        let mut share = dealing.packets[2].share;
        share.value = share.value + S::one();
        assert!(!verify_share::<B>(&share, &dealing.commitments));
        assert!(matches!(
            verify_share_strict::<B>(&share, &dealing.commitments),
            Err(Error::InvalidShare { index: 3 })
        ));
    }

    #[test]
    fn mutated_commitment_is_rejected() {
        let mut rng = StdRng::seed_from_u64(74);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).expect("distribute");
        let mut dealing = create(&sharing);
        dealing.commitments[1] = <B as Backend>::Point::random(&mut rng);

        let rejected = dealing
            .packets
            .iter()
            .filter(|p| !verify_share::<B>(&p.share, &dealing.commitments))
            .count();
        assert_eq!(rejected, 5, "every share must see the broken commitment");
    }

    #[test]
    fn wrong_index_is_rejected() {
        let mut rng = StdRng::seed_from_u64(75);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).expect("distribute");
        let dealing = create(&sharing);

        let mut share = dealing.packets[0].share;
        share.index = 2;
        assert!(!verify_share::<B>(&share, &dealing.commitments));
    }
}
