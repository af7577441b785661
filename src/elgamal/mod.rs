//! Threshold-ElGamal encryption family.
//!
//! # Overview
//!
//! Three interchangeable schemes share one outer shape. Every ciphertext
//! carries `beta = randomness · g`; the "decryptor" is the shared DH value
//! `randomness · pub = secret · beta` that unlocks the payload. It is never
//! persisted, only computed transiently by a key holder or reconstructed
//! from partial decryptors by the [combiner](crate::combiner).
//!
//! * [`Scheme::Plain`] — the message must already be a canonical point
//!   encoding; the payload is `decryptor + message_point`.
//! * [`Scheme::Kem`] — arbitrary bytes under AES-256-GCM with a key derived
//!   from the decryptor.
//! * [`Scheme::Ies`] — arbitrary bytes under AES-256-CTR plus HMAC-SHA256
//!   with independently derived keys; the MAC is checked in constant time
//!   before any decryption is attempted.
//!
//! Reusing a randomness scalar across two ciphertexts under the same public
//! key breaks semantic security; callers own that precondition.
//!
//! # Example
//!
//! ```rust
//! use quorus::arith::{Backend, GroupPoint, RistrettoBackend, Scalar};
//! use quorus::elgamal::{decrypt, encrypt, Scheme};
//!
//! type B = RistrettoBackend;
//! type P = <B as Backend>::Point;
//!
//! let mut rng = rand::thread_rng();
//! let secret = <B as Backend>::Scalar::random(&mut rng);
//! let public = P::mul_base(&secret);
//!
//! let output = encrypt::<B, _>(&mut rng, Scheme::Kem, b"attack at dawn", &public).unwrap();
//! let plaintext = decrypt::<B>(&output.ciphertext, &secret).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::arith::{Backend, GroupPoint};
use crate::errors::Error;
use crate::sigma::proofs::{prove_ddh, prove_dlog, verify_ddh, verify_dlog};
use crate::sigma::{SigmaOptions, SigmaProof};

mod ies;
mod kem;
mod plain;

const KDF_CONTEXT: &str = "quorus elgamal kdf v1";

/// Scheme selector for [`encrypt`] and combiner-side dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Point-payload ElGamal.
    Plain,
    /// Hybrid AES-256-GCM.
    #[default]
    Kem,
    /// Hybrid AES-256-CTR with HMAC-SHA256.
    Ies,
}

/// A scheme-tagged ciphertext; `beta` is common to all variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElGamalCiphertext<B: Backend> {
    Plain {
        alpha: B::Point,
        beta: B::Point,
    },
    Kem {
        /// AES-GCM output with the tag appended.
        ciphered: Vec<u8>,
        iv: [u8; 12],
        beta: B::Point,
    },
    Ies {
        ciphered: Vec<u8>,
        iv: [u8; 16],
        /// HMAC-SHA256 over the IV and the ciphered bytes.
        mac: [u8; 32],
        beta: B::Point,
    },
}

impl<B: Backend> ElGamalCiphertext<B> {
    /// The DH half `randomness · g`.
    pub fn beta(&self) -> &B::Point {
        match self {
            Self::Plain { beta, .. } | Self::Kem { beta, .. } | Self::Ies { beta, .. } => beta,
        }
    }

    /// The scheme this ciphertext was produced under.
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Plain { .. } => Scheme::Plain,
            Self::Kem { .. } => Scheme::Kem,
            Self::Ies { .. } => Scheme::Ies,
        }
    }
}

/// The result of an encryption, including the transient values a caller
/// needs for proofs. Both `decryptor` and `randomness` are secret material.
#[derive(Clone, Debug)]
pub struct EncryptionOutput<B: Backend> {
    pub ciphertext: ElGamalCiphertext<B>,
    pub decryptor: B::Point,
    pub randomness: B::Scalar,
}

/// Encrypts `message` to `public` under the chosen scheme.
#[instrument(level = "debug", skip_all, fields(scheme = ?scheme, len = message.len()))]
pub fn encrypt<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    scheme: Scheme,
    message: &[u8],
    public: &B::Point,
) -> Result<EncryptionOutput<B>, Error> {
    let randomness = <B::Scalar as crate::arith::Scalar>::random(rng);
    let beta = B::Point::mul_base(&randomness);
    let decryptor = public.mul_scalar(&randomness);

    let ciphertext = match scheme {
        Scheme::Plain => plain::encrypt::<B>(message, &decryptor, beta)?,
        Scheme::Kem => kem::encrypt::<B, R>(rng, message, &decryptor, beta)?,
        Scheme::Ies => ies::encrypt::<B, R>(rng, message, &decryptor, beta)?,
    };

    Ok(EncryptionOutput {
        ciphertext,
        decryptor,
        randomness,
    })
}

/// Decrypts with the private key, deriving `decryptor = secret · beta`.
pub fn decrypt<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    secret: &B::Scalar,
) -> Result<Vec<u8>, Error> {
    let decryptor = ciphertext.beta().mul_scalar(secret);
    decrypt_with_decryptor(ciphertext, &decryptor)
}

/// Decrypts with a decryptor obtained elsewhere, e.g. reconstructed from
/// partial decryptors.
pub fn decrypt_with_decryptor<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    decryptor: &B::Point,
) -> Result<Vec<u8>, Error> {
    match ciphertext {
        ElGamalCiphertext::Plain { alpha, .. } => plain::decrypt::<B>(alpha, decryptor),
        ElGamalCiphertext::Kem { ciphered, iv, .. } => kem::decrypt::<B>(ciphered, iv, decryptor),
        ElGamalCiphertext::Ies {
            ciphered, iv, mac, ..
        } => ies::decrypt::<B>(ciphered, iv, mac, decryptor),
    }
}

/// Decrypts with the sender's randomness, deriving
/// `decryptor = randomness · pub`.
pub fn decrypt_with_randomness<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    public: &B::Point,
    randomness: &B::Scalar,
) -> Result<Vec<u8>, Error> {
    decrypt_with_decryptor(ciphertext, &public.mul_scalar(randomness))
}

/// Proves `beta = randomness · g`, binding the ciphertext to its randomness.
pub fn prove_encryption<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    ciphertext: &ElGamalCiphertext<B>,
    randomness: &B::Scalar,
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove_dlog::<B, R>(
        rng,
        &B::Point::generator(),
        ciphertext.beta(),
        randomness,
        options,
    )
}

/// Verifies a [`prove_encryption`] transcript against the ciphertext.
pub fn verify_encryption<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify_dlog::<B>(&B::Point::generator(), ciphertext.beta(), proof, options)
}

/// Proves `decryptor = secret · beta` and `pub = secret · g` share the same
/// secret, without revealing it.
pub fn prove_decryptor<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    ciphertext: &ElGamalCiphertext<B>,
    decryptor: &B::Point,
    public: &B::Point,
    secret: &B::Scalar,
    options: &SigmaOptions<'_>,
) -> Result<SigmaProof<B>, Error> {
    prove_ddh::<B, R>(rng, ciphertext.beta(), decryptor, public, secret, options)
}

/// Verifies a [`prove_decryptor`] transcript, binding `decryptor` to
/// `{beta, pub}`.
pub fn verify_decryptor<B: Backend>(
    ciphertext: &ElGamalCiphertext<B>,
    decryptor: &B::Point,
    public: &B::Point,
    proof: &SigmaProof<B>,
    options: &SigmaOptions<'_>,
) -> bool {
    verify_ddh::<B>(ciphertext.beta(), decryptor, public, proof, options)
}

/// Derives `N` key bytes from a decryptor via the blake3 XOF.
pub(crate) fn kdf<B: Backend, const N: usize>(decryptor: &B::Point) -> [u8; N] {
    let mut out = [0u8; N];
    let mut hasher = blake3::Hasher::new_derive_key(KDF_CONTEXT);
    hasher.update(decryptor.to_bytes().as_ref());
    hasher.finalize_xof().fill(&mut out);
    out
}
