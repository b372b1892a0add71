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

use bls12_381_plus::{G2Affine, G2Projective};
use rand::{thread_rng, CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::ciphersuites::BbsCiphersuite;
use crate::{
    bls12381::{
        constants::{G1_COMPRESSED_BYTES, SCALAR_BYTES},
        g1::CurvePoint,
        pairing::{g2_from_bytes, g2_generator, g2_mul, g2_to_bytes, pairing_product_is_identity},
        scalar::{hash_to_scalar, Scalar},
    },
    errors::Error,
    keys::{
        pair::KeyPair,
        traits::{PrivateKey, PublicKey},
    },
    schemes::algorithms::BBSplus,
    utils::util::i2osp,
};

/// Public key `(sk·P1, sk·P2)`.
///
/// The G1 half is the key the messages are bound to; the G2 half `W` enters the pairing
/// equations. [`BBSplusPublicKey::from_bytes`] only accepts keys whose halves share the same
/// secret.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BBSplusPublicKey {
    pub g1: CurvePoint,
    pub w: G2Projective,
}

impl BBSplusPublicKey {
    pub const BYTES: usize = G1_COMPRESSED_BYTES + G2Affine::COMPRESSED_BYTES;

    /// `g1 (48) ‖ w (96)`
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..G1_COMPRESSED_BYTES].copy_from_slice(&self.g1.to_compressed());
        bytes[G1_COMPRESSED_BYTES..].copy_from_slice(&g2_to_bytes(&self.w));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::BYTES {
            return Err(Error::KeyDeserializationError(format!(
                "public key must be {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            )));
        }
        let g1 = CurvePoint::from_compressed(&bytes[..G1_COMPRESSED_BYTES])
            .map_err(|e| Error::KeyDeserializationError(e.to_string()))?;
        let w = g2_from_bytes(&bytes[G1_COMPRESSED_BYTES..])
            .map_err(|e| Error::KeyDeserializationError(e.to_string()))?;

        let pk = Self { g1, w };
        if !pk.is_consistent()? {
            return Err(Error::KeyDeserializationError("G1 and G2 halves do not match".to_owned()));
        }
        Ok(pk)
    }

    /// `e(g1, P2) == e(P1, w)` with a non-identity `g1`.
    pub fn is_consistent(&self) -> Result<bool, Error> {
        if self.g1.is_infinity() {
            return Ok(false);
        }
        let p2 = g2_generator();
        let minus_p1 = -CurvePoint::generator();
        pairing_product_is_identity(&[(&self.g1, &p2), (&minus_p1, &self.w)])
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded).map_err(|e| Error::KeyDeserializationError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for BBSplusPublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for BBSplusPublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        Self::decode(&encoded).map_err(de::Error::custom)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplusSecretKey(pub Scalar);

impl BBSplusSecretKey {
    /// Big-endian.
    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let sk = Scalar::from_bytes(bytes).map_err(|e| Error::KeyDeserializationError(e.to_string()))?;
        if sk.is_zero() {
            return Err(Error::KeyDeserializationError("secret key is zero".to_owned()));
        }
        Ok(Self(sk))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded).map_err(|e| Error::KeyDeserializationError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn public_key(&self) -> Result<BBSplusPublicKey, Error> {
        sk_to_pk(&self.0)
    }
}

impl PublicKey for BBSplusPublicKey {
    type Output = [u8; BBSplusPublicKey::BYTES];

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl PrivateKey for BBSplusSecretKey {
    type Output = [u8; SCALAR_BYTES];

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl<CS: BbsCiphersuite> KeyPair<BBSplus<CS>> {
    /// Key pair with a uniformly random secret key.
    pub fn random() -> Result<Self, Error> {
        Self::random_with_rng(&mut thread_rng())
    }

    pub fn random_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error> {
        let sk = Scalar::random_with_rng(rng);
        let pk = sk_to_pk(&sk)?;
        Ok(Self { public: pk, private: BBSplusSecretKey(sk) })
    }

    /// Deterministic key pair derived from `key_material` (at least 32 bytes).
    pub fn generate(key_material: &[u8], key_info: Option<&[u8]>, key_dst: Option<&[u8]>) -> Result<Self, Error> {
        let sk = key_gen::<CS>(key_material, key_info, key_dst)?;
        let pk = sk_to_pk(&sk)?;
        Ok(Self { public: pk, private: BBSplusSecretKey(sk) })
    }
}

/// SK = KeyGen(key_material, key_info, key_dst)
///
/// # Inputs:
/// * `key_material` (REQUIRED), a secret octet string of at least `CS::IKM_LEN` bytes.
/// * `key_info` (OPTIONAL), an octet string. Defaults to an empty string.
/// * `key_dst` (OPTIONAL), the domain separation tag. Defaults to
///   `api_id || "KEYGEN_DST_"`.
pub(crate) fn key_gen<CS>(key_material: &[u8], key_info: Option<&[u8]>, key_dst: Option<&[u8]>) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
{
    if key_material.len() < CS::IKM_LEN {
        return Err(Error::KeyGenError(format!("length(key_material) < {}", CS::IKM_LEN)));
    }

    let key_info = key_info.unwrap_or(&[]);
    if key_info.len() > 65535 {
        return Err(Error::KeyGenError("length(key_info) > 65535".to_owned()));
    }

    let key_dst_default = CS::keygen_dst();
    let key_dst = key_dst.unwrap_or(&key_dst_default);

    // derive_input = key_material || I2OSP(length(key_info), 2) || key_info
    let derive_input = [key_material, &i2osp(key_info.len(), 2), key_info].concat();

    let sk = hash_to_scalar(&derive_input, key_dst).map_err(|e| Error::KeyGenError(e.to_string()))?;
    if sk.is_zero() {
        return Err(Error::KeyGenError("derived secret key is zero".to_owned()));
    }
    Ok(sk)
}

/// PK = (SK·P1, SK·P2)
pub(crate) fn sk_to_pk(sk: &Scalar) -> Result<BBSplusPublicKey, Error> {
    Ok(BBSplusPublicKey { g1: CurvePoint::generator().multiply(sk), w: g2_mul(sk)? })
}
