// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{
    ciphersuites::{BbsCiphersuite, Bls12381Sha256},
    generators::Generators,
};
use crate::{
    bls12381::{g1::CurvePoint, hash2curve::hash_to_generators, scalar::Scalar},
    errors::Error,
    keys::pair::KeyPair,
    schemes::{
        algorithms::BBSplus,
        generics::{PoKSignature, Signature},
    },
    utils::{message::messages_to_bytes, random::generate_random_secret},
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn credential() -> Vec<Vec<u8>> {
    messages_to_bytes(&[
        "FirstName: Alice",
        "LastName: Smith",
        "Age: 25",
        "Nationality: Canadian",
        "PassportID: 123456789",
    ])
}

pub(crate) fn sign_verify<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();

    for messages in [vec![b"single".to_vec()], credential()] {
        let signature =
            Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();
        assert!(signature.verify(keypair.public_key(), &messages, None).unwrap());
    }
}

pub(crate) fn tampered_message<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let messages = credential();
    let signature =
        Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();

    for i in 0..messages.len() {
        let mut tampered = messages.clone();
        tampered[i][0] ^= 0x01;
        assert!(!signature.verify(keypair.public_key(), &tampered, None).unwrap());
    }

    let mut reordered = messages.clone();
    reordered.swap(0, 1);
    assert!(!signature.verify(keypair.public_key(), &reordered, None).unwrap());
}

pub(crate) fn wrong_public_key<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let other = KeyPair::<BBSplus<CS>>::random().unwrap();
    let messages = credential();
    let signature =
        Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();

    assert!(!signature.verify(other.public_key(), &messages, None).unwrap());
}

pub(crate) fn signing_domain<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let messages = credential();
    let domain: &[u8] = b"issuer.example/credentials/passport";
    let signature =
        Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), Some(domain)).unwrap();

    assert!(signature.verify(keypair.public_key(), &messages, Some(domain)).unwrap());
    assert!(!signature.verify(keypair.public_key(), &messages, None).unwrap());
    assert!(!signature.verify(keypair.public_key(), &messages, Some(&b"another domain"[..])).unwrap());

    // an empty domain is the same as no domain
    let plain = Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), Some(&b""[..])).unwrap();
    assert!(plain.verify(keypair.public_key(), &messages, None).unwrap());
}

pub(crate) fn message_count_limits<CS: BbsCiphersuite>() {
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let empty: Vec<Vec<u8>> = Vec::new();
    let res = Signature::<BBSplus<CS>>::sign(&empty, keypair.private_key(), keypair.public_key(), None);
    assert!(matches!(res, Err(Error::InvalidInput(_))));

    let too_many = vec![Vec::new(); 2049];
    let res = Signature::<BBSplus<CS>>::sign(&too_many, keypair.private_key(), keypair.public_key(), None);
    assert!(matches!(res, Err(Error::InvalidInput(_))));
}

pub(crate) fn signature_bytes_round_trip<CS: BbsCiphersuite>() {
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let messages = credential();
    let signature =
        Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();

    let restored = Signature::<BBSplus<CS>>::from_bytes(&signature.to_bytes()).unwrap();
    assert_eq!(restored.a(), signature.a());
    assert_eq!(restored.e(), signature.e());
    assert_eq!(restored.s(), signature.s());
    assert!(restored.verify(keypair.public_key(), &messages, None).unwrap());
}

pub(crate) fn selective_disclosure<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let pk = keypair.public_key();
    let messages = credential();
    let header: &[u8] = b"credential-domain";
    let signature = Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), pk, Some(header)).unwrap();
    let nonce = generate_random_secret(32);

    let subsets: [&[usize]; 5] = [&[], &[0], &[1, 3], &[0, 2, 4], &[0, 1, 2, 3, 4]];
    for disclosed_indexes in subsets {
        let proof = PoKSignature::<BBSplus<CS>>::proof_gen(
            signature.bbsPlusSignature(),
            pk,
            &messages,
            disclosed_indexes,
            Some(header),
            Some(nonce.as_slice()),
        )
        .unwrap();
        let disclosed: Vec<Vec<u8>> = disclosed_indexes.iter().map(|&i| messages[i].clone()).collect();
        assert!(proof.proof_verify(pk, &disclosed, disclosed_indexes, Some(header), Some(nonce.as_slice())).unwrap());
    }

    let possession =
        PoKSignature::<BBSplus<CS>>::create_possession_proof(signature.bbsPlusSignature(), pk, &messages, Some(header), None)
            .unwrap();
    assert!(possession.proof_verify(pk, &[], &[], Some(header), None).unwrap());

    let full = PoKSignature::<BBSplus<CS>>::create_full_disclosure_proof(
        signature.bbsPlusSignature(),
        pk,
        &messages,
        Some(header),
        None,
    )
    .unwrap();
    let all: Vec<usize> = (0..messages.len()).collect();
    assert!(full.proof_verify(pk, &messages, &all, Some(header), None).unwrap());
}

pub(crate) fn out_of_range_disclosure<CS: BbsCiphersuite>() {
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let messages = credential();
    let signature =
        Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();

    let res = PoKSignature::<BBSplus<CS>>::proof_gen(
        signature.bbsPlusSignature(),
        keypair.public_key(),
        &messages,
        &[5],
        None,
        None,
    );
    assert!(matches!(res, Err(Error::InvalidInput(_))));
}

pub(crate) fn challenge_binding<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let pk = keypair.public_key();
    let messages = credential();
    let header: &[u8] = b"credential-domain";
    let signature = Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), pk, Some(header)).unwrap();
    let nonce = generate_random_secret(16);

    let disclosed_indexes = [0usize, 2];
    let disclosed: Vec<Vec<u8>> = disclosed_indexes.iter().map(|&i| messages[i].clone()).collect();
    let proof = PoKSignature::<BBSplus<CS>>::proof_gen(
        signature.bbsPlusSignature(),
        pk,
        &messages,
        &disclosed_indexes,
        Some(header),
        Some(nonce.as_slice()),
    )
    .unwrap();
    assert!(proof.proof_verify(pk, &disclosed, &disclosed_indexes, Some(header), Some(nonce.as_slice())).unwrap());

    // disclosed message
    let mut changed = disclosed.clone();
    changed[1] = b"Age: 52".to_vec();
    assert!(!proof.proof_verify(pk, &changed, &disclosed_indexes, Some(header), Some(nonce.as_slice())).unwrap());

    // disclosed positions
    assert!(!proof.proof_verify(pk, &disclosed, &[0, 1], Some(header), Some(nonce.as_slice())).unwrap());

    // nonce
    let other_nonce = generate_random_secret(16);
    assert!(!proof.proof_verify(pk, &disclosed, &disclosed_indexes, Some(header), Some(other_nonce.as_slice())).unwrap());
    assert!(!proof.proof_verify(pk, &disclosed, &disclosed_indexes, Some(header), None).unwrap());

    // domain
    assert!(!proof.proof_verify(pk, &disclosed, &disclosed_indexes, Some(&b"other-domain"[..]), Some(nonce.as_slice())).unwrap());

    // commitment
    let mut bytes = proof.to_bytes();
    let first_commitment = 3 * 48 + 4 * 32;
    let replacement = CurvePoint::generator().multiply(&Scalar::from_u64(7)).to_compressed();
    bytes[first_commitment..first_commitment + 48].copy_from_slice(&replacement);
    let tampered = PoKSignature::<BBSplus<CS>>::from_bytes(&bytes).unwrap();
    assert!(!tampered.proof_verify(pk, &disclosed, &disclosed_indexes, Some(header), Some(nonce.as_slice())).unwrap());

    // another signer's key
    let other = KeyPair::<BBSplus<CS>>::random().unwrap();
    assert!(!proof
        .proof_verify(other.public_key(), &disclosed, &disclosed_indexes, Some(header), Some(nonce.as_slice()))
        .unwrap());
}

pub(crate) fn forged_signature_proof<CS: BbsCiphersuite>() {
    init_logger();
    // A proof built on a signature that does not verify passes the Schnorr relations but not
    // the pairing check.
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let pk = keypair.public_key();
    let messages = credential();
    let signature = Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), pk, None).unwrap();

    let mut forged = signature.bbsPlusSignature().clone();
    forged.a = &forged.a + &CurvePoint::generator();
    assert!(!Signature::<BBSplus<CS>>::BBSplus(forged.clone()).verify(pk, &messages, None).unwrap());

    let proof = PoKSignature::<BBSplus<CS>>::proof_gen(&forged, pk, &messages, &[0], None, None).unwrap();
    assert!(!proof.proof_verify(pk, &[messages[0].clone()], &[0], None, None).unwrap());
}

pub(crate) fn generators_deterministic<CS: BbsCiphersuite>() {
    let first = Generators::create::<CS>(10).unwrap();
    let second = Generators::create::<CS>(10).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let shorter = Generators::create::<CS>(4).unwrap();
    assert_eq!(&first.message_generators[..4], &shorter.message_generators[..]);

    let mut encodings: Vec<[u8; 48]> = hash_to_generators(32, &CS::generator_dst())
        .unwrap()
        .iter()
        .map(CurvePoint::to_compressed)
        .collect();
    encodings.sort_unstable();
    encodings.dedup();
    assert_eq!(encodings.len(), 32);
}

pub(crate) fn alice_scenario<CS: BbsCiphersuite>() {
    init_logger();
    let keypair = KeyPair::<BBSplus<CS>>::random().unwrap();
    let pk = keypair.public_key();
    let messages = credential();
    let signature = Signature::<BBSplus<CS>>::sign(&messages, keypair.private_key(), pk, None).unwrap();
    assert!(signature.verify(pk, &messages, None).unwrap());

    let nonce = generate_random_secret(16);
    let proof =
        PoKSignature::<BBSplus<CS>>::proof_gen(signature.bbsPlusSignature(), pk, &messages, &[0, 2], None, Some(nonce.as_slice()))
            .unwrap();

    let disclosed = messages_to_bytes(&["FirstName: Alice", "Age: 25"]);
    assert!(proof.proof_verify(pk, &disclosed, &[0, 2], None, Some(nonce.as_slice())).unwrap());

    let mut other_nonce = generate_random_secret(16);
    while other_nonce == nonce {
        other_nonce = generate_random_secret(16);
    }
    assert!(!proof.proof_verify(pk, &disclosed, &[0, 2], None, Some(other_nonce.as_slice())).unwrap());
}

#[test]
fn sign_verify_sha256() {
    sign_verify::<Bls12381Sha256>();
}

#[test]
fn tampered_message_sha256() {
    tampered_message::<Bls12381Sha256>();
}

#[test]
fn wrong_public_key_sha256() {
    wrong_public_key::<Bls12381Sha256>();
}

#[test]
fn signing_domain_sha256() {
    signing_domain::<Bls12381Sha256>();
}

#[test]
fn message_count_limits_sha256() {
    message_count_limits::<Bls12381Sha256>();
}

#[test]
fn signature_bytes_round_trip_sha256() {
    signature_bytes_round_trip::<Bls12381Sha256>();
}

#[test]
fn selective_disclosure_sha256() {
    selective_disclosure::<Bls12381Sha256>();
}

#[test]
fn out_of_range_disclosure_sha256() {
    out_of_range_disclosure::<Bls12381Sha256>();
}

#[test]
fn challenge_binding_sha256() {
    challenge_binding::<Bls12381Sha256>();
}

#[test]
fn forged_signature_proof_sha256() {
    forged_signature_proof::<Bls12381Sha256>();
}

#[test]
fn generators_deterministic_sha256() {
    generators_deterministic::<Bls12381Sha256>();
}

#[test]
fn alice_scenario_sha256() {
    alice_scenario::<Bls12381Sha256>();
}
