//! Serde serialization for the crate's wire types.
//!
//! # Serialization Strategy
//!
//! - **Points**: the backend's canonical compressed encoding via `to_bytes`
//! - **Scalars**: little-endian fixed-width byte arrays via `to_bytes`
//! - **Ciphertexts**: a `scheme` tag selects which payload fields are
//!   present; `beta` is always carried
//! - **Proofs**: point/scalar byte vectors plus the hash algorithm id
//!
//! Deserialization funnels every byte string through the backend's
//! `from_bytes`, so malformed or non-canonical encodings are rejected at the
//! serde boundary rather than deep inside a verification routine.
//!
//! # Example
//!
//! ```rust
//! use quorus::arith::{Backend, RistrettoBackend, Scalar};
//! use quorus::sharing::distribute;
//! use quorus::sharing::feldman;
//!
//! type B = RistrettoBackend;
//!
//! let mut rng = rand::thread_rng();
//! let secret = <B as Backend>::Scalar::random(&mut rng);
//! let sharing = distribute::<B, _>(&mut rng, &secret, 3, 2, &[]).unwrap();
//! let dealing = feldman::create(&sharing);
//! let packet = &dealing.packets[0];
//!
//! let json = serde_json::to_string(packet).unwrap();
//! let restored: quorus::sharing::SharePacket<B> = serde_json::from_str(&json).unwrap();
//! assert_eq!(*packet, restored);
//! ```

use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::arith::{Backend, GroupPoint, Scalar as _};
use crate::combiner::PartialDecryptor;
use crate::config::HashAlgorithm;
use crate::elgamal::{ElGamalCiphertext, Scheme};
use crate::sharing::{PublicShare, PublicSharePacket, SecretShare, SharePacket};
use crate::sigma::proofs::SchnorrSignature;
use crate::sigma::SigmaProof;

fn scalar_from_bytes<B: Backend, E: de::Error>(bytes: &[u8]) -> Result<B::Scalar, E> {
    B::Scalar::from_bytes(bytes).map_err(E::custom)
}

fn point_from_bytes<B: Backend, E: de::Error>(bytes: &[u8]) -> Result<B::Point, E> {
    B::Point::from_bytes(bytes).map_err(E::custom)
}

impl<B: Backend> Serialize for SecretShare<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SecretShare", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", self.value.to_bytes().as_ref())?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for SecretShare<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            index: u32,
            value: Vec<u8>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(SecretShare {
            index: helper.index,
            value: scalar_from_bytes::<B, D::Error>(&helper.value)?,
        })
    }
}

impl<B: Backend> Serialize for PublicShare<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PublicShare", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", self.value.to_bytes().as_ref())?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for PublicShare<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            index: u32,
            value: Vec<u8>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(PublicShare {
            index: helper.index,
            value: point_from_bytes::<B, D::Error>(&helper.value)?,
        })
    }
}

// Secret-share packet: {value, index, binding?}; binding only for Pedersen.
impl<B: Backend> Serialize for SharePacket<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SharePacket", 3)?;
        state.serialize_field("index", &self.share.index)?;
        state.serialize_field("value", self.share.value.to_bytes().as_ref())?;
        state.serialize_field(
            "binding",
            &self
                .binding
                .as_ref()
                .map(|binding| binding.to_bytes().as_ref().to_vec()),
        )?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for SharePacket<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            index: u32,
            value: Vec<u8>,
            #[serde(default)]
            binding: Option<Vec<u8>>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let binding = helper
            .binding
            .as_deref()
            .map(scalar_from_bytes::<B, D::Error>)
            .transpose()?;
        Ok(SharePacket {
            share: SecretShare {
                index: helper.index,
                value: scalar_from_bytes::<B, D::Error>(&helper.value)?,
            },
            binding,
        })
    }
}

// Public-share packet: {value, index, proof}.
impl<B: Backend> Serialize for PublicSharePacket<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PublicSharePacket", 3)?;
        state.serialize_field("index", &self.share.index)?;
        state.serialize_field("value", self.share.value.to_bytes().as_ref())?;
        state.serialize_field("proof", &self.proof)?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for PublicSharePacket<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "")]
        struct Helper<B: Backend> {
            index: u32,
            value: Vec<u8>,
            proof: SigmaProof<B>,
        }

        let helper = Helper::<B>::deserialize(deserializer)?;
        Ok(PublicSharePacket {
            share: PublicShare {
                index: helper.index,
                value: point_from_bytes::<B, D::Error>(&helper.value)?,
            },
            proof: helper.proof,
        })
    }
}

// Sigma-proof wire form: {commitments, response, algorithm}.
impl<B: Backend> Serialize for SigmaProof<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let commitments: Vec<Vec<u8>> = self
            .commitments
            .iter()
            .map(|point| point.to_bytes().as_ref().to_vec())
            .collect();
        let response: Vec<Vec<u8>> = self
            .responses
            .iter()
            .map(|scalar| scalar.to_bytes().as_ref().to_vec())
            .collect();

        let mut state = serializer.serialize_struct("SigmaProof", 3)?;
        state.serialize_field("commitments", &commitments)?;
        state.serialize_field("response", &response)?;
        state.serialize_field("algorithm", &self.algorithm)?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for SigmaProof<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            commitments: Vec<Vec<u8>>,
            response: Vec<Vec<u8>>,
            algorithm: HashAlgorithm,
        }

        let helper = Helper::deserialize(deserializer)?;
        let commitments = helper
            .commitments
            .iter()
            .map(|bytes| point_from_bytes::<B, D::Error>(bytes))
            .collect::<Result<_, _>>()?;
        let responses = helper
            .response
            .iter()
            .map(|bytes| scalar_from_bytes::<B, D::Error>(bytes))
            .collect::<Result<_, _>>()?;
        Ok(SigmaProof {
            commitments,
            responses,
            algorithm: helper.algorithm,
        })
    }
}

impl<B: Backend> Serialize for SchnorrSignature<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SchnorrSignature", 3)?;
        state.serialize_field("commitment", self.commitment.to_bytes().as_ref())?;
        state.serialize_field("response", self.response.to_bytes().as_ref())?;
        state.serialize_field("algorithm", &self.algorithm)?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for SchnorrSignature<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            commitment: Vec<u8>,
            response: Vec<u8>,
            algorithm: HashAlgorithm,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(SchnorrSignature {
            commitment: point_from_bytes::<B, D::Error>(&helper.commitment)?,
            response: scalar_from_bytes::<B, D::Error>(&helper.response)?,
            algorithm: helper.algorithm,
        })
    }
}

impl<B: Backend> Serialize for PartialDecryptor<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PartialDecryptor", 3)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", self.value.to_bytes().as_ref())?;
        state.serialize_field("proof", &self.proof)?;
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for PartialDecryptor<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "")]
        struct Helper<B: Backend> {
            index: u32,
            value: Vec<u8>,
            proof: SigmaProof<B>,
        }

        let helper = Helper::<B>::deserialize(deserializer)?;
        Ok(PartialDecryptor {
            index: helper.index,
            value: point_from_bytes::<B, D::Error>(&helper.value)?,
            proof: helper.proof,
        })
    }
}

// Ciphertext wire form: {scheme, beta, alpha-per-scheme}.
impl<B: Backend> Serialize for ElGamalCiphertext<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ElGamalCiphertext", 6)?;
        state.serialize_field("scheme", &self.scheme())?;
        state.serialize_field("beta", self.beta().to_bytes().as_ref())?;
        match self {
            ElGamalCiphertext::Plain { alpha, .. } => {
                state.serialize_field("alpha", &Some(alpha.to_bytes().as_ref().to_vec()))?;
                state.serialize_field("ciphered", &None::<Vec<u8>>)?;
                state.serialize_field("iv", &None::<Vec<u8>>)?;
                state.serialize_field("mac", &None::<Vec<u8>>)?;
            }
            ElGamalCiphertext::Kem { ciphered, iv, .. } => {
                state.serialize_field("alpha", &None::<Vec<u8>>)?;
                state.serialize_field("ciphered", &Some(ciphered.clone()))?;
                state.serialize_field("iv", &Some(iv.to_vec()))?;
                state.serialize_field("mac", &None::<Vec<u8>>)?;
            }
            ElGamalCiphertext::Ies {
                ciphered, iv, mac, ..
            } => {
                state.serialize_field("alpha", &None::<Vec<u8>>)?;
                state.serialize_field("ciphered", &Some(ciphered.clone()))?;
                state.serialize_field("iv", &Some(iv.to_vec()))?;
                state.serialize_field("mac", &Some(mac.to_vec()))?;
            }
        }
        state.end()
    }
}

impl<'de, B: Backend> Deserialize<'de> for ElGamalCiphertext<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            scheme: Scheme,
            beta: Vec<u8>,
            #[serde(default)]
            alpha: Option<Vec<u8>>,
            #[serde(default)]
            ciphered: Option<Vec<u8>>,
            #[serde(default)]
            iv: Option<Vec<u8>>,
            #[serde(default)]
            mac: Option<Vec<u8>>,
        }

        fn require<T, E: de::Error>(value: Option<T>, field: &'static str) -> Result<T, E> {
            value.ok_or_else(|| E::custom(format!("ciphertext is missing field `{field}`")))
        }

        fn fixed<const N: usize, E: de::Error>(bytes: Vec<u8>, field: &'static str) -> Result<[u8; N], E> {
            bytes
                .try_into()
                .map_err(|_| E::custom(format!("field `{field}` must be {N} bytes")))
        }

        let helper = Helper::deserialize(deserializer)?;
        let beta = point_from_bytes::<B, D::Error>(&helper.beta)?;
        match helper.scheme {
            Scheme::Plain => Ok(ElGamalCiphertext::Plain {
                alpha: point_from_bytes::<B, D::Error>(&require(helper.alpha, "alpha")?)?,
                beta,
            }),
            Scheme::Kem => Ok(ElGamalCiphertext::Kem {
                ciphered: require(helper.ciphered, "ciphered")?,
                iv: fixed::<12, D::Error>(require(helper.iv, "iv")?, "iv")?,
                beta,
            }),
            Scheme::Ies => Ok(ElGamalCiphertext::Ies {
                ciphered: require(helper.ciphered, "ciphered")?,
                iv: fixed::<16, D::Error>(require(helper.iv, "iv")?, "iv")?,
                mac: fixed::<32, D::Error>(require(helper.mac, "mac")?, "mac")?,
                beta,
            }),
        }
    }
}

#[cfg(test)]
#[cfg(feature = "ristretto")]
mod tests {
    use crate::arith::{Backend, GroupPoint, RistrettoBackend, Scalar};
    use crate::combiner::{self, PartialDecryptor};
    use crate::elgamal::{encrypt, ElGamalCiphertext, Scheme};
    use crate::sharing::{distribute, feldman, pedersen, PublicSharePacket, SharePacket};
    use crate::sigma::SigmaOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type B = RistrettoBackend;
    type S = <B as Backend>::Scalar;
    type P = <B as Backend>::Point;

    #[test]
    fn share_packets_roundtrip_with_and_without_binding() {
        let mut rng = StdRng::seed_from_u64(151);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 3, 2, &[]).expect("distribute");

        let dealing = feldman::create(&sharing);
        let feldman_packet = &dealing.packets[0];
        let json = serde_json::to_string(feldman_packet).expect("serialize");
        let restored: SharePacket<B> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*feldman_packet, restored);
        assert!(restored.binding.is_none());

        let h = P::random(&mut rng);
        let blinded = pedersen::create(&mut rng, &sharing, &h);
        let pedersen_packet = &blinded.packets[0];
        let json = serde_json::to_string(pedersen_packet).expect("serialize");
        let restored: SharePacket<B> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*pedersen_packet, restored);
        assert!(restored.binding.is_some());
    }

    #[test]
    fn public_share_packet_survives_transport_and_still_verifies() {
        let mut rng = StdRng::seed_from_u64(152);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 3, 2, &[]).expect("distribute");
        let options = SigmaOptions::default();
        let packet = sharing
            .secret_share(1)
            .prove_identity(&mut rng, &options)
            .expect("prove");

        let json = serde_json::to_string(&packet).expect("serialize");
        let restored: PublicSharePacket<B> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(packet, restored);
        assert!(restored.verify(&options));
    }

    #[test]
    fn ciphertexts_roundtrip_per_scheme() {
        let mut rng = StdRng::seed_from_u64(153);
        let secret = S::random(&mut rng);
        let public = P::mul_base(&secret);

        for scheme in [Scheme::Plain, Scheme::Kem, Scheme::Ies] {
            let message: Vec<u8> = match scheme {
                Scheme::Plain => P::random(&mut rng).to_bytes().as_ref().to_vec(),
                _ => b"wire bytes".to_vec(),
            };
            let output = encrypt::<B, _>(&mut rng, scheme, &message, &public).expect("encrypt");
            let json = serde_json::to_string(&output.ciphertext).expect("serialize");
            let restored: ElGamalCiphertext<B> = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(output.ciphertext, restored);
            assert_eq!(
                crate::elgamal::decrypt::<B>(&restored, &secret).expect("decrypt"),
                message
            );
        }
    }

    #[test]
    fn kem_fields_are_required() {
        let json = r#"{"scheme":"kem","beta":[0,0]}"#;
        assert!(serde_json::from_str::<ElGamalCiphertext<B>>(json).is_err());
    }

    #[test]
    fn partial_decryptor_survives_transport_and_still_validates() {
        let mut rng = StdRng::seed_from_u64(154);
        let secret = S::random(&mut rng);
        let sharing = distribute::<B, _>(&mut rng, &secret, 3, 2, &[]).expect("distribute");
        let output =
            encrypt::<B, _>(&mut rng, Scheme::Kem, b"m", &sharing.public()).expect("encrypt");
        let options = SigmaOptions::default();
        let partial = combiner::create_partial_decryptor(
            &mut rng,
            &output.ciphertext,
            &sharing.secret_share(2),
            &options,
        )
        .expect("partial");

        let json = serde_json::to_string(&partial).expect("serialize");
        let restored: PartialDecryptor<B> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(partial, restored);
        assert!(combiner::validate_partial_decryptor(
            &output.ciphertext,
            &sharing.public_shares()[1],
            &restored,
            &options
        ));
    }

    #[test]
    fn malformed_point_bytes_are_rejected() {
        let json = r#"{"index":1,"value":[1,2,3]}"#;
        assert!(serde_json::from_str::<crate::sharing::PublicShare<B>>(json).is_err());
    }
}
