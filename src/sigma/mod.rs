//! Generic Sigma-protocol / Fiat-Shamir NIZK engine.
//!
//! One engine proves knowledge of scalars `x_1..x_n` satisfying a set of
//! linear relations `v_i = Σ_j x_j · u_{i,j}` over group elements. Every
//! concrete proof in the crate — discrete log, DDH tuples, Okamoto
//! commitment openings, AND-compositions, Schnorr signatures — is a thin
//! relation builder over this module (see [`proofs`]).
//!
//! # Protocol
//!
//! 1. The prover draws masking scalars `k_1..k_n` and commits to
//!    `t_i = Σ_j k_j · u_{i,j}`.
//! 2. The challenge `c` is derived by hashing a length-framed transcript of
//!    the group metadata, the relation, the commitments, optional message
//!    bytes, and an optional nonce.
//! 3. The responses are `r_j = k_j + c · x_j`.
//! 4. Verification recomputes `c` and checks `Σ_j r_j · u_{i,j} = t_i + c · v_i`
//!    for every row; a proof is never partially valid.
//!
//! # Failure modes
//!
//! [`verify`] returns `false` on any cryptographic mismatch and never raises;
//! callers that need a hard guarantee wrap the boolean themselves (see e.g.
//! [`crate::combiner::validate_partial_decryptor`]). [`prove`] raises
//! [`Error::InvalidConfig`] only on relation/witness shape misuse.

use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256, Sha512};

use crate::arith::{Backend, GroupPoint, Scalar};
use crate::config::HashAlgorithm;
use crate::errors::Error;

pub mod proofs;

const TRANSCRIPT_DOMAIN: &[u8] = b"quorus:sigma:v1";

/// A system of linear relations `targets[i] = Σ_j witnesses[j] · rows[i][j]`.
///
/// Every row must have one generator per witness; unused cells hold the
/// neutral element, which contributes nothing to the row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearRelation<B: Backend> {
    /// Generator matrix, one row per relation.
    pub rows: Vec<Vec<B::Point>>,
    /// Claimed image of each row.
    pub targets: Vec<B::Point>,
}

impl<B: Backend> LinearRelation<B> {
    /// Bundles a generator matrix with its targets.
    pub fn new(rows: Vec<Vec<B::Point>>, targets: Vec<B::Point>) -> Self {
        Self { rows, targets }
    }

    /// Number of witnesses the relation expects.
    pub fn witnesses(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn is_well_formed(&self) -> bool {
        let width = self.witnesses();
        width > 0
            && self.rows.len() == self.targets.len()
            && !self.rows.is_empty()
            && self.rows.iter().all(|row| row.len() == width)
    }
}

/// A non-interactive proof transcript.
///
/// Immutable once produced; verification is all-or-nothing over the whole
/// response vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigmaProof<B: Backend> {
    /// Row commitments `t_i`.
    pub commitments: Vec<B::Point>,
    /// Witness responses `r_j`.
    pub responses: Vec<B::Scalar>,
    /// Challenge hash this proof was produced under.
    pub algorithm: HashAlgorithm,
}

/// Prover-side options; verification reads the algorithm from the proof and
/// the message/nonce from the verifier's own copy of these options.
#[derive(Clone, Copy, Debug, Default)]
pub struct SigmaOptions<'a> {
    /// Challenge hash selection.
    pub algorithm: HashAlgorithm,
    /// Extra bytes bound into the challenge (e.g. a signed message).
    pub message: &'a [u8],
    /// Replay/domain binding; a proof made with a nonce fails verification
    /// without it, and vice versa.
    pub nonce: Option<&'a [u8]>,
}

/// Proves knowledge of `witnesses` for `relation`.
pub fn prove<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    relation: &LinearRelation<B>,
    witnesses: &[B::Scalar],
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    if !relation.is_well_formed() {
        return Err(Error::InvalidConfig(
            "relation rows must be non-empty and of equal width".into(),
        ));
    }
    if witnesses.len() != relation.witnesses() {
        return Err(Error::InvalidConfig(format!(
            "relation expects {} witnesses, got {}",
            relation.witnesses(),
            witnesses.len()
        )));
    }

    let masks: Vec<B::Scalar> = witnesses.iter().map(|_| B::Scalar::random(rng)).collect();
    let commitments: Vec<B::Point> = relation
        .rows
        .iter()
        .map(|row| linear_combination::<B>(row, &masks))
        .collect();

    let c = challenge::<B>(
        relation,
        &commitments,
        options.algorithm,
        options.message,
        options.nonce,
    );
    let responses = masks
        .iter()
        .zip(witnesses.iter())
        .map(|(k, x)| *k + c * *x)
        .collect();

    Ok(SigmaProof {
        commitments,
        responses,
        algorithm: options.algorithm,
    })
}

/// Verifies a proof against `relation`.
///
/// Returns `false` on any mismatch, including shape mismatches between the
/// proof and the relation. The challenge is recomputed under the algorithm
/// recorded in the proof, which is itself part of the transcript.
pub fn verify<B: Backend>(
    relation: &LinearRelation<B>,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    if !relation.is_well_formed()
        || proof.commitments.len() != relation.targets.len()
        || proof.responses.len() != relation.witnesses()
    {
        return false;
    }

    let c = challenge::<B>(
        relation,
        &proof.commitments,
        proof.algorithm,
        options.message,
        options.nonce,
    );

    relation
        .rows
        .iter()
        .zip(relation.targets.iter())
        .zip(proof.commitments.iter())
        .all(|((row, target), commitment)| {
            let lhs = linear_combination::<B>(row, &proof.responses);
            let rhs = commitment.add(&target.mul_scalar(&c));
            lhs == rhs
        })
}

fn linear_combination<B: Backend>(row: &[B::Point], scalars: &[B::Scalar]) -> B::Point {
    row.iter()
        .zip(scalars.iter())
        .fold(B::Point::identity(), |acc, (point, scalar)| {
            acc.add(&point.mul_scalar(scalar))
        })
}

fn challenge<B: Backend>(
    relation: &LinearRelation<B>,
    commitments: &[B::Point],
    algorithm: HashAlgorithm,
    message: &[u8],
    nonce: Option<&[u8]>,
) -> B::Scalar {
    let mut transcript = Transcript::new();
    transcript.append(TRANSCRIPT_DOMAIN);
    transcript.append(algorithm.name().as_bytes());
    transcript.append(B::CURVE.name().as_bytes());
    transcript.append(B::ORDER_LE);
    transcript.append(B::Point::generator().to_bytes().as_ref());
    transcript.append_u64(relation.rows.len() as u64);
    transcript.append_u64(relation.witnesses() as u64);
    for row in &relation.rows {
        for point in row {
            transcript.append(point.to_bytes().as_ref());
        }
    }
    for target in &relation.targets {
        transcript.append(target.to_bytes().as_ref());
    }
    for commitment in commitments {
        transcript.append(commitment.to_bytes().as_ref());
    }
    transcript.append(message);
    match nonce {
        Some(nonce) => {
            transcript.append(&[1]);
            transcript.append(nonce);
        }
        None => transcript.append(&[0]),
    }
    B::Scalar::from_uniform(&transcript.finalize(algorithm))
}

/// Length-framed byte transcript reduced to 64 uniform bytes.
struct Transcript {
    buf: Vec<u8>,
}

impl Transcript {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn append(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(&(chunk.len() as u64).to_le_bytes());
        self.buf.extend_from_slice(chunk);
    }

    fn append_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn finalize(self, algorithm: HashAlgorithm) -> [u8; 64] {
        let mut out = [0u8; 64];
        match algorithm {
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(&self.buf);
                hasher.finalize_xof().fill(&mut out);
            }
            HashAlgorithm::Sha256 => {
                // Counter-separated digests widen SHA-256 to 64 bytes.
                let mut lo = Sha256::new();
                lo.update([0u8]);
                lo.update(&self.buf);
                out[..32].copy_from_slice(&lo.finalize());
                let mut hi = Sha256::new();
                hi.update([1u8]);
                hi.update(&self.buf);
                out[32..].copy_from_slice(&hi.finalize());
            }
            HashAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(&self.buf);
                out.copy_from_slice(&hasher.finalize());
            }
        }
        out
    }
}

#[cfg(test)]
#[cfg(feature = "ristretto")]
mod tests {
    use super::*;
    use crate::arith::RistrettoBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = RistrettoBackend;
    type S = <B as Backend>::Scalar;
    type P = <B as Backend>::Point;

    fn dlog_relation(rng: &mut StdRng) -> (LinearRelation<B>, Vec<S>) {
        let x = S::random(rng);
        let base = P::random(rng);
        let relation = LinearRelation::new(vec![vec![base]], vec![base.mul_scalar(&x)]);
        (relation, vec![x])
    }

    #[test]
    fn honest_transcript_verifies() {
        let mut rng = StdRng::seed_from_u64(31);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let options = SigmaOptions::default();
        let proof = prove(&mut rng, &relation, &witnesses, &options).expect("prove");
        assert!(verify(&relation, &proof, &options));
    }

    #[test]
    fn all_hash_algorithms_roundtrip() {
        let mut rng = StdRng::seed_from_u64(32);
        for algorithm in [
            HashAlgorithm::Blake3,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            let (relation, witnesses) = dlog_relation(&mut rng);
            let options = SigmaOptions {
                algorithm,
                ..SigmaOptions::default()
            };
            let proof = prove(&mut rng, &relation, &witnesses, &options).expect("prove");
            assert!(verify(&relation, &proof, &options), "{algorithm:?}");
        }
    }

    #[test]
    fn tampered_response_fails() {
        let mut rng = StdRng::seed_from_u64(33);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let options = SigmaOptions::default();
        let mut proof = prove(&mut rng, &relation, &witnesses, &options).expect("prove");
        proof.responses[0] = proof.responses[0] + S::one();
        assert!(!verify(&relation, &proof, &options));
    }

    #[test]
    fn tampered_commitment_fails() {
        let mut rng = StdRng::seed_from_u64(34);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let options = SigmaOptions::default();
        let mut proof = prove(&mut rng, &relation, &witnesses, &options).expect("prove");
        proof.commitments[0] = P::random(&mut rng);
        assert!(!verify(&relation, &proof, &options));
    }

    #[test]
    fn tampered_algorithm_tag_fails() {
        let mut rng = StdRng::seed_from_u64(35);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let options = SigmaOptions::default();
        let mut proof = prove(&mut rng, &relation, &witnesses, &options).expect("prove");
        proof.algorithm = HashAlgorithm::Sha512;
        assert!(!verify(&relation, &proof, &options));
    }

    #[test]
    fn nonce_binding_is_enforced() {
        let mut rng = StdRng::seed_from_u64(36);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let with_nonce = SigmaOptions {
            nonce: Some(b"session-42"),
            ..SigmaOptions::default()
        };
        let proof = prove(&mut rng, &relation, &witnesses, &with_nonce).expect("prove");

        assert!(verify(&relation, &proof, &with_nonce));
        assert!(
            !verify(&relation, &proof, &SigmaOptions::default()),
            "proof with nonce must fail without one"
        );
        let other_nonce = SigmaOptions {
            nonce: Some(b"session-43"),
            ..SigmaOptions::default()
        };
        assert!(!verify(&relation, &proof, &other_nonce));

        let bare = prove(&mut rng, &relation, &witnesses, &SigmaOptions::default()).expect("prove");
        assert!(
            !verify(&relation, &bare, &with_nonce),
            "proof without nonce must fail when one is expected"
        );
    }

    #[test]
    fn message_binding_is_enforced() {
        let mut rng = StdRng::seed_from_u64(37);
        let (relation, witnesses) = dlog_relation(&mut rng);
        let signed = SigmaOptions {
            message: b"transfer 10 coins",
            ..SigmaOptions::default()
        };
        let proof = prove(&mut rng, &relation, &witnesses, &signed).expect("prove");
        assert!(verify(&relation, &proof, &signed));
        let forged = SigmaOptions {
            message: b"transfer 99 coins",
            ..SigmaOptions::default()
        };
        assert!(!verify(&relation, &proof, &forged));
    }

    #[test]
    fn multi_row_proofs_are_all_or_nothing() {
        let mut rng = StdRng::seed_from_u64(38);
        let z = S::random(&mut rng);
        let u = P::random(&mut rng);
        let g = P::generator();
        let relation = LinearRelation::<B>::new(
            vec![vec![u], vec![g]],
            vec![u.mul_scalar(&z), g.mul_scalar(&z)],
        );
        let options = SigmaOptions::default();
        let proof = prove(&mut rng, &relation, &[z], &options).expect("prove");
        assert!(verify(&relation, &proof, &options));

        // Breaking one target invalidates the whole proof.
        let broken = LinearRelation::<B>::new(
            relation.rows.clone(),
            vec![relation.targets[0], P::random(&mut rng)],
        );
        assert!(!verify(&broken, &proof, &options));
    }

    #[test]
    fn witness_count_mismatch_is_config_error() {
        let mut rng = StdRng::seed_from_u64(39);
        let (relation, _) = dlog_relation(&mut rng);
        let extra = [S::one(), S::one()];
        assert!(matches!(
            prove(&mut rng, &relation, &extra, &SigmaOptions::default()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
