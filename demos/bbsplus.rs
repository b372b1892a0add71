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

#[cfg(feature = "bbsplus")]
mod bbsplus_example {
    use zkcred::{
        bbsplus::ciphersuites::BbsCiphersuite,
        errors::Error,
        keys::pair::KeyPair,
        schemes::{
            algorithms::{BBSplus, Scheme},
            generics::{PoKSignature, Signature},
        },
        utils::{
            message::messages_to_bytes,
            random::generate_random_secret,
            util::get_messages,
        },
    };

    pub(crate) fn bbsplus_main<S: Scheme>() -> Result<(), Error>
    where
        S::Ciphersuite: BbsCiphersuite,
    {
        const MSGS: [&str; 5] = [
            "FirstName: Alice",
            "LastName: Smith",
            "Age: 25",
            "Nationality: Canadian",
            "PassportID: 123456789",
        ];

        log::info!("Messages: {:?}", MSGS);

        let header = b"passport-office".to_vec();
        let key_material = generate_random_secret(S::Ciphersuite::IKM_LEN);

        log::info!("Keypair Generation");
        let issuer_keypair = KeyPair::<BBSplus<S::Ciphersuite>>::generate(&key_material, None, None)?;

        let issuer_sk = issuer_keypair.private_key();
        log::info!("SK: {}", issuer_sk.encode());
        let issuer_pk = issuer_keypair.public_key();
        log::info!("PK: {}", issuer_pk.encode());

        let messages = messages_to_bytes(&MSGS);
        log::info!("Signature Computation...");
        let signature = Signature::<BBSplus<S::Ciphersuite>>::sign(&messages, issuer_sk, issuer_pk, Some(header.as_slice()))?;
        log::info!("Signature: {}", signature.encode());

        if !signature.verify(issuer_pk, &messages, Some(header.as_slice()))? {
            log::error!("Signature verification FAILED!");
            return Ok(());
        }
        log::info!("Signature is VALID");

        //Holder receive nonce from Verifier
        let nonce_verifier = generate_random_secret(16);
        log::info!("Nonce: {}", hex::encode(&nonce_verifier));

        let disclosed_indexes = [0usize, 2usize];

        //Holder generates SPoK
        log::info!("Proof of Knowledge of the Signature Generation...");
        let proof = PoKSignature::<BBSplus<S::Ciphersuite>>::proof_gen(
            signature.bbsPlusSignature(),
            issuer_pk,
            &messages,
            &disclosed_indexes,
            Some(header.as_slice()),
            Some(nonce_verifier.as_slice()),
        )?;
        log::info!("Proof ({} bytes): {}", proof.to_bytes().len(), proof.encode());

        //Verifier verifies SPoK
        let disclosed_messages = get_messages(&messages, &disclosed_indexes)?;

        log::info!("Proof of Knowledge of the Signature verification...");
        let valid = proof.proof_verify(
            issuer_pk,
            &disclosed_messages,
            &disclosed_indexes,
            Some(header.as_slice()),
            Some(nonce_verifier.as_slice()),
        )?;
        if valid {
            log::info!("Proof of Knowledge of the Signature is VALID!");
        } else {
            log::error!("Proof of Knowledge of the Signature Verification Failed!");
        }

        let replayed = proof.proof_verify(
            issuer_pk,
            &disclosed_messages,
            &disclosed_indexes,
            Some(header.as_slice()),
            Some(generate_random_secret(16).as_slice()),
        )?;
        log::info!("Same proof under a different nonce accepted: {}", replayed);

        Ok(())
    }
}

#[cfg(feature = "bbsplus")]
fn main() {
    use crate::bbsplus_example::bbsplus_main;
    use std::env;
    use zkcred::schemes::algorithms::BbsBls12381Sha256;

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            if let Err(e) = bbsplus_main::<BbsBls12381Sha256>() {
                log::error!("{e}");
            }
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
        }
    }
}

#[cfg(not(feature = "bbsplus"))]
fn main() {}
