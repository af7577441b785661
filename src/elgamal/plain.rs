//! Point-payload ElGamal.
//!
//! The message bytes must decode to a subgroup point; the payload is the
//! group-law sum `alpha = decryptor + message_point` and decryption subtracts
//! the decryptor back out. Useful when the plaintext is itself group
//! material (e.g. a re-encrypted key share).

use crate::arith::{Backend, GroupPoint};
use crate::errors::Error;

use super::ElGamalCiphertext;

pub(super) fn encrypt<B: Backend>(
    message: &[u8],
    decryptor: &B::Point,
    beta: B::Point,
) -> Result<ElGamalCiphertext<B>, Error> {
    let point = B::Point::from_bytes(message)?;
    Ok(ElGamalCiphertext::Plain {
        alpha: decryptor.add(&point),
        beta,
    })
}

pub(super) fn decrypt<B: Backend>(alpha: &B::Point, decryptor: &B::Point) -> Result<Vec<u8>, Error> {
    let point = alpha.sub(decryptor);
    Ok(point.to_bytes().as_ref().to_vec())
}

#[cfg(test)]
#[cfg(feature = "ristretto")]
mod tests {
    use crate::arith::{Backend, GroupPoint, RistrettoBackend, Scalar};
    use crate::elgamal::{decrypt, encrypt, Scheme};
    use crate::errors::{BackendError, Error};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = RistrettoBackend;
    type S = <B as Backend>::Scalar;
    type P = <B as Backend>::Point;

    #[test]
    fn point_message_roundtrip() {
        let mut rng = StdRng::seed_from_u64(101);
        let secret = S::random(&mut rng);
        let public = P::mul_base(&secret);
        let message = P::random(&mut rng).to_bytes();

        let output =
            encrypt::<B, _>(&mut rng, Scheme::Plain, message.as_ref(), &public).expect("encrypt");
        let plaintext = decrypt::<B>(&output.ciphertext, &secret).expect("decrypt");
        assert_eq!(plaintext, message.as_ref());
    }

    #[test]
    fn non_point_message_is_rejected() {
        let mut rng = StdRng::seed_from_u64(102);
        let public = P::mul_base(&S::random(&mut rng));

        let err = encrypt::<B, _>(&mut rng, Scheme::Plain, b"not a point", &public).unwrap_err();
        assert!(matches!(
            err,
            Error::Backend(BackendError::BadEncoding(_))
        ));

        let mut bytes = [0xffu8; 32];
        bytes[31] = 0xff;
        let err = encrypt::<B, _>(&mut rng, Scheme::Plain, &bytes, &public).unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }
}
