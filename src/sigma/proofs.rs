//! Concrete proofs built on the linear-relation engine.
//!
//! Each proof here is a relation builder plus a thin semantic wrapper; the
//! Fiat-Shamir loop lives once in [`super`]. The DDH proof is the workhorse
//! of threshold decryption: it shows a partial decryptor and its public share
//! were derived from the same private scalar.

use rand_core::{CryptoRng, RngCore};

use crate::arith::{Backend, GroupPoint};
use crate::errors::Error;

use super::{prove, verify, LinearRelation, SigmaOptions, SigmaProof};

/// Proves knowledge of `x` with `v = x · u`.
pub fn prove_dlog<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    base: &B::Point,
    target: &B::Point,
    witness: &B::Scalar,
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove(rng, &dlog_relation::<B>(base, target), &[*witness], options)
}

/// Verifies a [`prove_dlog`] transcript.
pub fn verify_dlog<B: Backend>(
    base: &B::Point,
    target: &B::Point,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify(&dlog_relation::<B>(base, target), proof, options)
}

fn dlog_relation<B: Backend>(base: &B::Point, target: &B::Point) -> LinearRelation<B> {
    LinearRelation::new(vec![vec![*base]], vec![*target])
}

/// Proves `w = z · u` and `v = z · g` share the witness `z`, for the tuple
/// `(u, w, v)` against the group generator.
pub fn prove_ddh<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    u: &B::Point,
    w: &B::Point,
    v: &B::Point,
    witness: &B::Scalar,
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove(rng, &ddh_relation::<B>(u, w, v), &[*witness], options)
}

/// Verifies a [`prove_ddh`] transcript.
pub fn verify_ddh<B: Backend>(
    u: &B::Point,
    w: &B::Point,
    v: &B::Point,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify(&ddh_relation::<B>(u, w, v), proof, options)
}

fn ddh_relation<B: Backend>(u: &B::Point, w: &B::Point, v: &B::Point) -> LinearRelation<B> {
    LinearRelation::new(
        vec![vec![*u], vec![B::Point::generator()]],
        vec![*w, *v],
    )
}

/// Proves an opening `(s, t)` of the double-generator commitment
/// `u = s · g + t · h`.
pub fn prove_okamoto<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    h: &B::Point,
    commitment: &B::Point,
    s: &B::Scalar,
    t: &B::Scalar,
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove(rng, &okamoto_relation::<B>(h, commitment), &[*s, *t], options)
}

/// Verifies a [`prove_okamoto`] transcript.
pub fn verify_okamoto<B: Backend>(
    h: &B::Point,
    commitment: &B::Point,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify(&okamoto_relation::<B>(h, commitment), proof, options)
}

fn okamoto_relation<B: Backend>(h: &B::Point, commitment: &B::Point) -> LinearRelation<B> {
    LinearRelation::new(vec![vec![B::Point::generator(), *h]], vec![*commitment])
}

/// AND-composition: proves every `targets[j] = witnesses[j] · bases[j]`
/// under a single challenge.
///
/// One relation row per pair, diagonal generator matrix with neutral-element
/// padding. All-or-nothing; cheaper than independent proofs.
pub fn prove_many_dlogs<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    pairs: &[(B::Point, B::Point)],
    witnesses: &[B::Scalar],
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove(rng, &diagonal_relation::<B>(pairs), witnesses, options)
}

/// Verifies a [`prove_many_dlogs`] transcript.
pub fn verify_many_dlogs<B: Backend>(
    pairs: &[(B::Point, B::Point)],
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify(&diagonal_relation::<B>(pairs), proof, options)
}

fn diagonal_relation<B: Backend>(pairs: &[(B::Point, B::Point)]) -> LinearRelation<B> {
    let width = pairs.len();
    let rows = pairs
        .iter()
        .enumerate()
        .map(|(j, (base, _))| {
            let mut row = vec![B::Point::identity(); width];
            if width > 0 {
                row[j] = *base;
            }
            row
        })
        .collect();
    let targets = pairs.iter().map(|(_, target)| *target).collect();
    LinearRelation::new(rows, targets)
}

/// A Schnorr signature: a dlog proof with the signed message bound into the
/// challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchnorrSignature<B: Backend> {
    /// Mask commitment `k · g`.
    pub commitment: B::Point,
    /// Response `k + c · x`.
    pub response: B::Scalar,
    /// Challenge hash the signature was produced under.
    pub algorithm: crate::config::HashAlgorithm,
}

/// Signs `message` under the private key `x` with public key `x · g`.
pub fn sign<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    private_key: &B::Scalar,
    message: &[u8],
    options: &SigmaOptions<'_>,
) -> Result<SchnorrSignature<B>, Error> {
    let public = B::Point::mul_base(private_key);
    let options = SigmaOptions { message, ..*options };
    let proof = prove_dlog::<B, R>(rng, &B::Point::generator(), &public, private_key, &options)?;
    Ok(SchnorrSignature {
        commitment: proof.commitments[0],
        response: proof.responses[0],
        algorithm: proof.algorithm,
    })
}

/// Verifies a Schnorr signature on `message` against `public_key`.
pub fn verify_signature<B: Backend>(
    public_key: &B::Point,
    message: &[u8],
    signature: &SchnorrSignature<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    let proof = SigmaProof {
        commitments: vec![signature.commitment],
        responses: vec![signature.response],
        algorithm: signature.algorithm,
    };
    let options = SigmaOptions { message, ..*options };
    verify_dlog::<B>(&B::Point::generator(), public_key, &proof, &options)
}
