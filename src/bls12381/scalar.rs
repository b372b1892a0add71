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

use core::fmt;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    constants::{curve_order, SCALAR_BYTES},
    hash2curve::expand_message_xmd,
};
use crate::{
    errors::Error,
    utils::util::{mod_inverse, to_fixed_be},
};

/// Output length of `expand_message_xmd` when hashing to a scalar. 48 bytes keep the bias of
/// the final reduction below 2^-128.
pub const EXPAND_LEN: usize = 48;

/// Integer modulo the prime order r of G1.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Scalar(pub(crate) BigUint);

impl_modular_ops!(Scalar, curve_order);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{})", hex::encode(self.to_bytes()))
    }
}

impl Scalar {
    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    pub fn one() -> Self {
        Scalar(BigUint::one())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    /// Reduces `value` modulo r.
    pub fn new(value: BigUint) -> Self {
        Scalar(value % curve_order())
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn invert(&self) -> Result<Self, Error> {
        mod_inverse(&self.0, curve_order()).map(Scalar)
    }

    /// Big-endian, 32 bytes.
    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        to_fixed_be(&self.0)
    }

    /// Canonical decoding of 32 big-endian bytes.
    ///
    /// # Errors
    /// [`Error::DeserializationError`] on a wrong length or a value not below r.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SCALAR_BYTES {
            return Err(Error::DeserializationError(format!(
                "scalar must be {SCALAR_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let value = BigUint::from_bytes_be(bytes);
        if &value >= curve_order() {
            return Err(Error::DeserializationError("scalar not below the group order".to_owned()));
        }
        Ok(Scalar(value))
    }

    pub fn from_okm(okm: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(okm))
    }

    /// Uniformly random nonzero scalar from the thread-local CSPRNG.
    pub fn random() -> Self {
        Self::random_with_rng(&mut thread_rng())
    }

    /// Rejection sampling: 32 random bytes with the top bit cleared, retried until the value
    /// lies in `[1, r)`.
    pub fn random_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut buf = [0u8; SCALAR_BYTES];
        loop {
            rng.fill_bytes(&mut buf);
            buf[0] &= 0x7f;
            let candidate = BigUint::from_bytes_be(&buf);
            if !candidate.is_zero() && &candidate < curve_order() {
                return Scalar(candidate);
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Scalar::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// hash_to_scalar(input, dst) = OS2IP(expand_message_xmd(input, dst, 48)) mod r.
///
/// `expand_message_xmd` absorbs `input` followed by `dst ‖ I2OSP(len(dst), 1)`.
///
/// # Errors
/// [`Error::InvalidInput`] if `dst` is longer than 255 bytes.
pub fn hash_to_scalar(input: &[u8], dst: &[u8]) -> Result<Scalar, Error> {
    let uniform_bytes = expand_message_xmd(input, dst, EXPAND_LEN)?;
    Ok(Scalar::from_okm(&uniform_bytes))
}

/// See [`Scalar::random`].
pub fn random_scalar() -> Scalar {
    Scalar::random()
}
