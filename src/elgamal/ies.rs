//! Hybrid IES: blake3-derived key pair, AES-256-CTR payload, HMAC-SHA256 tag.
//!
//! 64 KDF bytes split into an encryption key and an independent MAC key.
//! The MAC covers the IV and the ciphered bytes and is compared in constant
//! time; on mismatch decryption returns [`Error::InvalidMac`] without ever
//! touching the cipher, so a forged ciphertext learns nothing about the
//! keystream.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;
use hmac::{Hmac, Mac};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::arith::Backend;
use crate::errors::Error;

use super::{kdf, ElGamalCiphertext};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha256 = Hmac<Sha256>;

pub(super) fn encrypt<B: Backend, R: RngCore + CryptoRng>(
    rng: &mut R,
    message: &[u8],
    decryptor: &B::Point,
    beta: B::Point,
) -> Result<ElGamalCiphertext<B>, Error> {
    let (enc_key, mac_key) = split_keys::<B>(decryptor);

    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut iv);

    let mut ciphered = message.to_vec();
    let mut cipher = Aes256Ctr::new(&enc_key.into(), &iv.into());
    cipher.apply_keystream(&mut ciphered);

    let mac = tag(&mac_key, &iv, &ciphered)?;
    Ok(ElGamalCiphertext::Ies {
        ciphered,
        iv,
        mac,
        beta,
    })
}

pub(super) fn decrypt<B: Backend>(
    ciphered: &[u8],
    iv: &[u8; 16],
    mac: &[u8; 32],
    decryptor: &B::Point,
) -> Result<Vec<u8>, Error> {
    let (enc_key, mac_key) = split_keys::<B>(decryptor);

    let expected = tag(&mac_key, iv, ciphered)?;
    if !bool::from(expected[..].ct_eq(&mac[..])) {
        return Err(Error::InvalidMac);
    }

    let mut plaintext = ciphered.to_vec();
    let mut cipher = Aes256Ctr::new(&enc_key.into(), iv.into());
    cipher.apply_keystream(&mut plaintext);
    Ok(plaintext)
}

fn split_keys<B: Backend>(decryptor: &B::Point) -> ([u8; 32], [u8; 32]) {
    let material: [u8; 64] = kdf::<B, 64>(decryptor);
    let mut enc_key = [0u8; 32];
    let mut mac_key = [0u8; 32];
    enc_key.copy_from_slice(&material[..32]);
    mac_key.copy_from_slice(&material[32..]);
    (enc_key, mac_key)
}

fn tag(mac_key: &[u8; 32], iv: &[u8; 16], ciphered: &[u8]) -> Result<[u8; 32], Error> {
    let mut mac = HmacSha256::new_from_slice(mac_key)
        .map_err(|_| Error::Symmetric("hmac key rejected"))?;
    mac.update(iv);
    mac.update(ciphered);
    Ok(mac.finalize().into_bytes().into())
}
