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

//! Issues a credential from a JSON file of attributes and prints what an uploader would send to
//! a verification endpoint: the issuer key, the signature and the attribute messages, hex encoded.
//!
//! `cargo run --example issuer -- attributes.json`

#[cfg(feature = "bbsplus")]
fn main() {
    use std::{env, fs};
    use zkcred::{
        keys::pair::KeyPair,
        schemes::{algorithms::BbsBls12381Sha256, generics::Signature},
        utils::message::{messages_from_json, messages_to_bytes},
    };

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let attributes: serde_json::Value = match args.get(1) {
        Some(path) => match fs::read_to_string(path).map(|data| serde_json::from_str(&data)) {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                log::error!("{path} is not valid JSON: {e}");
                return;
            }
            Err(e) => {
                log::error!("cannot read {path}: {e}");
                return;
            }
        },
        None => serde_json::json!({
            "FirstName": "Alice",
            "LastName": "Smith",
            "Age": 25,
            "Nationality": "Canadian",
            "PassportID": "123456789"
        }),
    };

    let messages = match messages_from_json(&attributes) {
        Ok(messages) => messages,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Messages: {:?}", messages);
    let messages = messages_to_bytes(&messages);

    let issued = KeyPair::<BbsBls12381Sha256>::random().and_then(|keypair| {
        let signature =
            Signature::<BbsBls12381Sha256>::sign(&messages, keypair.private_key(), keypair.public_key(), None)?;
        let valid = signature.verify(keypair.public_key(), &messages, None)?;
        Ok((keypair, signature, valid))
    });

    match issued {
        Ok((keypair, signature, valid)) => {
            log::info!("Signature verifies: {valid}");
            let upload = serde_json::json!({
                "publicKey": keypair.public_key().encode(),
                "signature": signature.encode(),
                "messages": messages.iter().map(hex::encode).collect::<Vec<_>>(),
            });
            println!("{upload:#}");
        }
        Err(e) => log::error!("issuance failed: {e}"),
    }
}

#[cfg(not(feature = "bbsplus"))]
fn main() {}
