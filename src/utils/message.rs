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

use serde_json::Value;

use crate::errors::Error;

#[cfg(feature = "bbsplus")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "bbsplus")]
use crate::{
    bbsplus::ciphersuites::BbsCiphersuite,
    bls12381::scalar::{hash_to_scalar, Scalar},
};

/// Canonical bytes of string attributes (UTF-8).
pub fn messages_to_bytes<T: AsRef<str>>(messages: &[T]) -> Vec<Vec<u8>> {
    messages.iter().map(|m| m.as_ref().as_bytes().to_vec()).collect()
}

/// Turns a JSON object of credential attributes into `"key: value"` messages, in the order the
/// attributes appear. String values are taken verbatim, any other value in its JSON form.
///
/// # Errors
/// [`Error::InvalidInput`] if `attributes` is not a non-empty JSON object.
pub fn messages_from_json(attributes: &Value) -> Result<Vec<String>, Error> {
    let object = attributes
        .as_object()
        .ok_or_else(|| Error::InvalidInput("attributes must be a JSON object".to_owned()))?;
    if object.is_empty() {
        return Err(Error::InvalidInput("attributes must not be empty".to_owned()));
    }

    Ok(object
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}: {s}"),
            other => format!("{key}: {other}"),
        })
        .collect())
}

/// A message mapped to a scalar of the signature group.
#[cfg(feature = "bbsplus")]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplusMessage {
    pub value: Scalar,
}

#[cfg(feature = "bbsplus")]
impl BBSplusMessage {
    pub fn new(msg: Scalar) -> Self {
        Self { value: msg }
    }

    /// `hash_to_scalar(data, dst)`, with the ciphersuite's message tag when `dst` is `None`.
    pub fn map_message_to_scalar_as_hash<CS: BbsCiphersuite>(data: &[u8], dst: Option<&[u8]>) -> Result<Self, Error> {
        let default_dst = CS::message_dst();
        let dst = dst.unwrap_or(&default_dst);
        Ok(Self { value: hash_to_scalar(data, dst)? })
    }

    pub fn messages_to_scalar<CS: BbsCiphersuite>(messages: &[Vec<u8>]) -> Result<Vec<Self>, Error> {
        messages
            .iter()
            .map(|m| Self::map_message_to_scalar_as_hash::<CS>(m, None))
            .collect()
    }
}
