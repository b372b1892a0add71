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

use core::fmt::Debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Domain-separation parameters of a BBS+ ciphersuite.
///
/// Every hash in the scheme is keyed by a tag built from [`BbsCiphersuite::API_ID`], so two
/// ciphersuites never share generators, message scalars or challenges.
pub trait BbsCiphersuite:
    Clone + Debug + Eq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const API_ID: &'static [u8];
    /// Minimum length of the key material accepted by deterministic key generation.
    const IKM_LEN: usize = 32;
    const BLINDING_GENERATOR_SEED: &'static [u8] = b"BLINDING_GENERATOR";
    const DOMAIN_GENERATOR_SEED: &'static [u8] = b"DOMAIN_GENERATOR";

    fn generator_dst() -> Vec<u8> {
        [Self::API_ID, b"GENERATOR_"].concat()
    }

    fn message_dst() -> Vec<u8> {
        [Self::API_ID, b"MESSAGE_"].concat()
    }

    fn domain_dst() -> Vec<u8> {
        [Self::API_ID, b"DOMAIN_"].concat()
    }

    fn challenge_dst() -> Vec<u8> {
        [Self::API_ID, b"PROOF_CHALLENGE_"].concat()
    }

    fn keygen_dst() -> Vec<u8> {
        [Self::API_ID, b"KEYGEN_DST_"].concat()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bls12381Sha256;

impl BbsCiphersuite for Bls12381Sha256 {
    const API_ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_H2G_HM2S_";
}
