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

use core::marker::PhantomData;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    bbsplus::{
        ciphersuites::{BbsCiphersuite, Bls12381Sha256},
        keys::{BBSplusPublicKey, BBSplusSecretKey},
    },
    keys::traits::{PrivateKey, PublicKey},
};

/// Marker for the BBS+ scheme instantiated with ciphersuite `CS`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplus<CS: BbsCiphersuite>(PhantomData<CS>);

pub type BbsBls12381Sha256 = BBSplus<Bls12381Sha256>;

pub trait Scheme: Eq + 'static + Sized + Serialize + DeserializeOwned {
    type Ciphersuite: BbsCiphersuite;
    type PrivKey: PrivateKey;
    type PubKey: PublicKey;
}

impl<CS: BbsCiphersuite> Scheme for BBSplus<CS> {
    type Ciphersuite = CS;
    type PrivKey = BBSplusSecretKey;
    type PubKey = BBSplusPublicKey;
}
