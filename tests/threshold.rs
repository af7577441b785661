//! End-to-end threshold decryption scenarios.

#![cfg(feature = "ristretto")]

use quorus::arith::{Backend, GroupPoint, RistrettoBackend, Scalar};
use quorus::combiner;
use quorus::elgamal::{encrypt, EncryptionOutput, Scheme};
use quorus::sharing::{distribute, feldman, pedersen, Sharing};
use quorus::sigma::SigmaOptions;
use quorus::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

type B = RistrettoBackend;
type S = <B as Backend>::Scalar;
type P = <B as Backend>::Point;

const MESSAGE: &[u8] = b"meet at the old bridge at midnight";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn deal(rng: &mut StdRng) -> Sharing<B> {
    init_tracing();
    let secret = S::random(rng);
    distribute::<B, _>(rng, &secret, 5, 3, &[]).expect("distribute")
}

fn respond(
    rng: &mut StdRng,
    sharing: &Sharing<B>,
    output: &EncryptionOutput<B>,
    indexes: &[u32],
) -> Vec<combiner::PartialDecryptor<B>> {
    let options = SigmaOptions::default();
    indexes
        .iter()
        .map(|&index| {
            combiner::create_partial_decryptor(
                rng,
                &output.ciphertext,
                &sharing.secret_share(index),
                &options,
            )
            .expect("partial decryptor")
        })
        .collect()
}

#[test]
fn three_of_five_decryption_for_every_scheme() {
    let mut rng = StdRng::seed_from_u64(201);
    let sharing = deal(&mut rng);
    let options = SigmaOptions::default();

    for scheme in [Scheme::Plain, Scheme::Kem, Scheme::Ies] {
        let message: Vec<u8> = match scheme {
            Scheme::Plain => P::random(&mut rng).to_bytes().as_ref().to_vec(),
            _ => MESSAGE.to_vec(),
        };
        let output =
            encrypt::<B, _>(&mut rng, scheme, &message, &sharing.public()).expect("encrypt");
        let partials = respond(&mut rng, &sharing, &output, &[1, 3, 5]);

        let report = combiner::validate_partial_decryptors(
            &output.ciphertext,
            &sharing.public_shares(),
            &partials,
            Some(3),
            &options,
        )
        .expect("validate");
        assert!(report.all_valid, "{scheme:?}");

        // The reconstructed decryptor is exactly secret * beta.
        let decryptor =
            combiner::reconstruct_decryptor::<B>(&partials, Some(3)).expect("reconstruct");
        assert_eq!(
            decryptor,
            output.ciphertext.beta().mul_scalar(&sharing.secret())
        );

        let plaintext =
            combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3)).expect("decrypt");
        assert_eq!(plaintext, message, "{scheme:?}");
    }
}

#[test]
fn two_partials_cannot_decrypt() {
    let mut rng = StdRng::seed_from_u64(202);
    let sharing = deal(&mut rng);
    let output =
        encrypt::<B, _>(&mut rng, Scheme::Kem, MESSAGE, &sharing.public()).expect("encrypt");
    let partials = respond(&mut rng, &sharing, &output, &[2, 4]);

    assert!(matches!(
        combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3)),
        Err(Error::InsufficientShares {
            required: 3,
            provided: 2
        })
    ));

    // Opting out of the threshold check yields a wrong decryptor, and the
    // AEAD layer refuses the resulting key.
    assert!(matches!(
        combiner::decrypt::<B>(&output.ciphertext, &partials, None),
        Err(Error::Symmetric(_))
    ));
}

#[test]
fn corrupted_partials_are_all_named() {
    let mut rng = StdRng::seed_from_u64(203);
    let sharing = deal(&mut rng);
    let options = SigmaOptions::default();
    let output =
        encrypt::<B, _>(&mut rng, Scheme::Kem, MESSAGE, &sharing.public()).expect("encrypt");
    let mut partials = respond(&mut rng, &sharing, &output, &[1, 2, 3, 4, 5]);

    partials[1].value = P::random(&mut rng); // index 2
    partials[2].value = P::random(&mut rng); // index 3

    let report = combiner::validate_partial_decryptors(
        &output.ciphertext,
        &sharing.public_shares(),
        &partials,
        Some(3),
        &options,
    )
    .expect("validate");
    assert!(!report.all_valid);
    assert_eq!(report.invalid_indexes, vec![2, 3]);

    // Aggregating with the corrupted contributions must not decrypt.
    assert!(matches!(
        combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3)),
        Err(Error::Symmetric(_))
    ));

    // Dropping the bad indexes leaves a valid quorum.
    let good: Vec<_> = partials
        .into_iter()
        .filter(|p| !report.invalid_indexes.contains(&p.index))
        .collect();
    let plaintext = combiner::decrypt::<B>(&output.ciphertext, &good, Some(3)).expect("decrypt");
    assert_eq!(plaintext, MESSAGE);
}

#[test]
fn vss_backed_key_generation_flow() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(204);
    let secret = S::random(&mut rng);
    let sharing = distribute::<B, _>(&mut rng, &secret, 5, 3, &[]).expect("distribute");
    let options = SigmaOptions::default();

    // Dealer publishes Feldman commitments; every party checks its packet.
    let dealing = feldman::create(&sharing);
    for packet in &dealing.packets {
        feldman::verify_share_strict::<B>(&packet.share, &dealing.commitments)
            .expect("feldman share");
    }

    // Pedersen variant against an independent generator.
    let h = P::random(&mut rng);
    let blinded = pedersen::create(&mut rng, &sharing, &h);
    for packet in &blinded.packets {
        let binding = packet.binding.expect("pedersen binding");
        pedersen::verify_share_strict::<B>(&packet.share, &binding, &h, &blinded.commitments)
            .expect("pedersen share");
    }

    // Each party advertises its public share with an identity proof, and the
    // joint public key reconstructs from any quorum of advertisements.
    let packets: Vec<_> = sharing
        .secret_shares()
        .iter()
        .map(|share| share.prove_identity(&mut rng, &options).expect("identity"))
        .collect();
    for packet in &packets {
        packet.verify_strict(&options).expect("advertisement");
    }
    let advertised: Vec<_> = packets[..3].iter().map(|p| p.share).collect();
    let public = combiner::reconstruct_public::<B>(&advertised, Some(3)).expect("public");
    assert_eq!(public, sharing.public());
}

#[test]
fn resharing_keeps_pinned_shares_and_the_secret() {
    let mut rng = StdRng::seed_from_u64(205);
    let sharing = deal(&mut rng);
    let secret = sharing.secret();

    // Two parties keep their old shares across the re-deal.
    let keep = [sharing.secret_share(2), sharing.secret_share(4)];
    let pinned: Vec<(u32, S)> = keep.iter().map(|s| (s.index, s.value)).collect();
    let resharing =
        distribute::<B, _>(&mut rng, &secret, 5, 3, &pinned).expect("re-distribute");

    assert_eq!(resharing.secret(), secret);
    for share in &keep {
        assert_eq!(resharing.secret_share(share.index).value, share.value);
    }

    // Old pinned shares plus one new share still reconstruct the secret.
    let mixed = [keep[0], keep[1], resharing.secret_share(1)];
    let recovered = combiner::reconstruct_key::<B>(&mixed, Some(3)).expect("reconstruct");
    assert_eq!(recovered, secret);
}

#[test]
fn decryption_proofs_travel_with_the_ciphertext() {
    let mut rng = StdRng::seed_from_u64(206);
    let sharing = deal(&mut rng);
    let options = SigmaOptions {
        nonce: Some(b"session-7"),
        ..SigmaOptions::default()
    };
    let output =
        encrypt::<B, _>(&mut rng, Scheme::Ies, MESSAGE, &sharing.public()).expect("encrypt");

    let enc_proof =
        quorus::elgamal::prove_encryption(&mut rng, &output.ciphertext, &output.randomness, &options)
            .expect("encryption proof");
    assert!(quorus::elgamal::verify_encryption(
        &output.ciphertext,
        &enc_proof,
        &options
    ));
    // The nonce binds the proof to this session.
    assert!(!quorus::elgamal::verify_encryption(
        &output.ciphertext,
        &enc_proof,
        &SigmaOptions::default()
    ));

    let partials = respond_with(&mut rng, &sharing, &output, &[1, 2, 3], &options);
    let report = combiner::validate_partial_decryptors(
        &output.ciphertext,
        &sharing.public_shares(),
        &partials,
        Some(3),
        &options,
    )
    .expect("validate");
    assert!(report.all_valid);
    assert_eq!(
        combiner::decrypt::<B>(&output.ciphertext, &partials, Some(3)).expect("decrypt"),
        MESSAGE
    );
}

fn respond_with(
    rng: &mut StdRng,
    sharing: &Sharing<B>,
    output: &EncryptionOutput<B>,
    indexes: &[u32],
    options: &SigmaOptions<'_>,
) -> Vec<combiner::PartialDecryptor<B>> {
    indexes
        .iter()
        .map(|&index| {
            combiner::create_partial_decryptor(
                rng,
                &output.ciphertext,
                &sharing.secret_share(index),
                options,
            )
            .expect("partial decryptor")
        })
        .collect()
}
