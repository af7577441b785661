//! Hybrid KEM: blake3-derived key, AES-256-GCM payload.
//!
//! The decryptor is hashed into a 32-byte key; the message is sealed under a
//! fresh 96-bit nonce. The GCM tag rides at the end of `ciphered`, so a
//! wrong decryptor surfaces as an AEAD failure rather than garbage output.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand_core::{CryptoRng, RngCore};

use crate::arith::Backend;
use crate::errors::Error;

use super::{kdf, ElGamalCiphertext};

pub(super) fn encrypt<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    message: &[u8],
    decryptor: &B::Point,
    beta: B::Point,
) -> Result<ElGamalCiphertext<B>, Error> {
    let key: [u8; 32] = kdf::<B, 32>(decryptor);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    let mut iv = [0u8; 12];
    rng.fill_bytes(&mut iv);

    let ciphered = cipher
        .encrypt(Nonce::from_slice(&iv), message)
        .map_err(|_| Error::Symmetric("aead encryption failed"))?;

    Ok(ElGamalCiphertext::Kem { ciphered, iv, beta })
}

pub(super) fn decrypt<B: Backend>(
    ciphered: &[u8],
    iv: &[u8; 12],
    decryptor: &B::Point,
) -> Result<Vec<u8>, Error> {
    let key: [u8; 32] = kdf::<B, 32>(decryptor);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(iv), ciphered)
        .map_err(|_| Error::Symmetric("aead tag verification failed"))
}
