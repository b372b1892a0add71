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

use serde::{Deserialize, Serialize};

use super::ciphersuites::BbsCiphersuite;
use crate::{
    bls12381::{
        constants::MAX_MESSAGES,
        g1::CurvePoint,
        hash2curve::{hash_to_curve, hash_to_generators},
    },
    errors::Error,
};

/// Points a signature over `message_generators.len()` messages is computed against.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Generators {
    /// `P1`
    #[serde(rename = "BP")]
    pub g1_base_point: CurvePoint,
    /// `h0`, multiplies the blinding scalar `s`.
    #[serde(rename = "H0")]
    pub blinding: CurvePoint,
    /// `Q`, multiplies the domain scalar.
    #[serde(rename = "Q")]
    pub domain: CurvePoint,
    #[serde(rename = "MsgGenerators")]
    pub message_generators: Vec<CurvePoint>,
}

impl Generators {
    /// Derives the generators for `count` messages. The message generators for `count` are a
    /// prefix of those for any larger count.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if `count` exceeds the maximum number of messages.
    pub fn create<CS>(count: usize) -> Result<Generators, Error>
    where
        CS: BbsCiphersuite,
    {
        if count > MAX_MESSAGES {
            return Err(Error::InvalidInput(format!(
                "{count} messages exceed the maximum of {MAX_MESSAGES}"
            )));
        }

        let dst = CS::generator_dst();
        log::trace!("deriving {count} message generators");

        Ok(Generators {
            g1_base_point: CurvePoint::generator(),
            blinding: hash_to_curve(CS::BLINDING_GENERATOR_SEED, &dst)?,
            domain: hash_to_curve(CS::DOMAIN_GENERATOR_SEED, &dst)?,
            message_generators: hash_to_generators(count, &dst)?,
        })
    }
}
