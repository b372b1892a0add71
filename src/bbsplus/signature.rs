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

use rand::{thread_rng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::{
    ciphersuites::BbsCiphersuite,
    generators::Generators,
    keys::{BBSplusPublicKey, BBSplusSecretKey},
};
use crate::{
    bls12381::{
        constants::{G1_COMPRESSED_BYTES, MAX_MESSAGES, SCALAR_BYTES},
        g1::CurvePoint,
        pairing::{g2_generator, g2_mul, pairing_product_is_identity},
        scalar::{hash_to_scalar, Scalar},
    },
    errors::Error,
    schemes::{algorithms::BBSplus, generics::Signature},
    utils::message::BBSplusMessage,
};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplusSignature {
    pub a: CurvePoint,
    pub e: Scalar,
    pub s: Scalar,
}

impl BBSplusSignature {
    pub const BYTES: usize = G1_COMPRESSED_BYTES + 2 * SCALAR_BYTES;

    /// `A (48) ‖ e (32) ‖ s (32)`
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..48].copy_from_slice(&self.a.to_compressed());
        bytes[48..80].copy_from_slice(&self.e.to_bytes());
        bytes[80..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != Self::BYTES {
            return Err(Error::DeserializationError(format!(
                "signature must be {} bytes, got {}",
                Self::BYTES,
                data.len()
            )));
        }
        let a = CurvePoint::from_compressed(&data[..48])?;
        let e = Scalar::from_bytes(&data[48..80])?;
        let s = Scalar::from_bytes(&data[80..])?;
        Ok(Self { a, e, s })
    }
}

impl<CS: BbsCiphersuite> Signature<BBSplus<CS>> {
    pub fn a(&self) -> &CurvePoint {
        &self.bbsPlusSignature().a
    }

    pub fn e(&self) -> &Scalar {
        &self.bbsPlusSignature().e
    }

    pub fn s(&self) -> &Scalar {
        &self.bbsPlusSignature().s
    }

    /// Signs an ordered, non-empty list of messages. `header` is the signing domain; an empty
    /// or missing header adds no domain term.
    pub fn sign(messages: &[Vec<u8>], sk: &BBSplusSecretKey, pk: &BBSplusPublicKey, header: Option<&[u8]>) -> Result<Self, Error> {
        Self::sign_with_rng(messages, sk, pk, header, &mut thread_rng())
    }

    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        messages: &[Vec<u8>],
        sk: &BBSplusSecretKey,
        pk: &BBSplusPublicKey,
        header: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        check_message_count(messages.len())?;
        let message_scalars = BBSplusMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(messages.len())?;
        let signature = core_sign::<CS, R>(sk, pk, &generators, header, &message_scalars, rng)?;

        Ok(Self::BBSplus(signature))
    }

    /// `Ok(false)` for any signature that does not verify; `Err` only for malformed input.
    pub fn verify(&self, pk: &BBSplusPublicKey, messages: &[Vec<u8>], header: Option<&[u8]>) -> Result<bool, Error> {
        check_message_count(messages.len())?;
        let message_scalars = BBSplusMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(messages.len())?;

        core_verify::<CS>(pk, self.bbsPlusSignature(), &message_scalars, &generators, header)
    }

    pub fn bbsPlusSignature(&self) -> &BBSplusSignature {
        match self {
            Self::BBSplus(inner) => inner,
            Self::_Unreachable(never, _) => match *never {},
        }
    }

    pub fn to_bytes(&self) -> [u8; BBSplusSignature::BYTES] {
        self.bbsPlusSignature().to_bytes()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(Self::BBSplus(BBSplusSignature::from_bytes(data)?))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded).map_err(|e| Error::DeserializationError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

pub(crate) fn check_message_count(count: usize) -> Result<(), Error> {
    if count == 0 {
        return Err(Error::InvalidInput("messages must not be empty".to_owned()));
    }
    if count > MAX_MESSAGES {
        return Err(Error::InvalidInput(format!(
            "{count} messages exceed the maximum of {MAX_MESSAGES}"
        )));
    }
    Ok(())
}

/// `Q·hash_to_scalar(header)` for a non-empty header, `None` otherwise.
pub(crate) fn domain_term<CS: BbsCiphersuite>(generators: &Generators, header: Option<&[u8]>) -> Result<Option<CurvePoint>, Error> {
    match header {
        Some(header) if !header.is_empty() => {
            let domain = hash_to_scalar(header, &CS::domain_dst())?;
            Ok(Some(&generators.domain * &domain))
        }
        _ => Ok(None),
    }
}

/// B = P1 + Q·domain + H_1·msg_1 + ... + H_L·msg_L
pub(crate) fn compute_b<CS: BbsCiphersuite>(
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BBSplusMessage],
) -> Result<CurvePoint, Error> {
    if generators.message_generators.len() != messages.len() {
        return Err(Error::InvalidInput("one generator per message is required".to_owned()));
    }

    let mut B = generators.g1_base_point.clone();
    if let Some(term) = domain_term::<CS>(generators, header)? {
        B = B + term;
    }
    for (H_i, m_i) in generators.message_generators.iter().zip(messages) {
        B = B + H_i * &m_i.value;
    }
    Ok(B)
}

fn core_sign<CS, R>(
    sk: &BBSplusSecretKey,
    pk: &BBSplusPublicKey,
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BBSplusMessage],
    rng: &mut R,
) -> Result<BBSplusSignature, Error>
where
    CS: BbsCiphersuite,
    R: RngCore + CryptoRng,
{
    if pk.g1 != CurvePoint::generator().multiply(&sk.0) {
        return Err(Error::SignatureGenerationError("public key does not match the secret key".to_owned()));
    }

    let B = compute_b::<CS>(generators, header, messages)?;

    // e with SK + e != 0, and a nonzero s = r1 + r2·e
    let (e, s, sk_plus_e_inv) = loop {
        let e = Scalar::random_with_rng(rng);
        let r1 = Scalar::random_with_rng(rng);
        let r2 = Scalar::random_with_rng(rng);
        let s = &r1 + &(&r2 * &e);
        if s.is_zero() {
            continue;
        }
        if let Ok(inv) = (&sk.0 + &e).invert() {
            break (e, s, inv);
        }
    };

    // A = (B + s·h0) * (1 / (SK + e))
    let A = (B + &generators.blinding * &s) * &sk_plus_e_inv;

    if A.is_infinity() {
        return Err(Error::SignatureGenerationError("A == Identity_G1".to_owned()));
    }

    Ok(BBSplusSignature { a: A, e, s })
}

fn core_verify<CS>(
    pk: &BBSplusPublicKey,
    signature: &BBSplusSignature,
    messages: &[BBSplusMessage],
    generators: &Generators,
    header: Option<&[u8]>,
) -> Result<bool, Error>
where
    CS: BbsCiphersuite,
{
    if signature.a.is_infinity() || !signature.a.is_on_curve() {
        log::debug!("signature rejected: A is the identity or off the curve");
        return Ok(false);
    }
    if !signature.a.is_torsion_free() {
        log::debug!("signature rejected: A is outside the prime-order subgroup");
        return Ok(false);
    }
    if signature.e.is_zero() || signature.s.is_zero() {
        log::debug!("signature rejected: e or s is zero");
        return Ok(false);
    }

    let B = compute_b::<CS>(generators, header, messages)?;
    let B_blinded = B + &generators.blinding * &signature.s;

    // e(A, W + e·P2) · e(-(B + s·h0), P2) == 1
    let w_plus_e = pk.w + g2_mul(&signature.e)?;
    let p2 = g2_generator();
    let minus_b = -B_blinded;

    let valid = pairing_product_is_identity(&[(&signature.a, &w_plus_e), (&minus_b, &p2)])?;
    if !valid {
        log::debug!("signature rejected: pairing equation does not hold");
    }
    Ok(valid)
}
