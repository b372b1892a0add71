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
    keys::BBSplusPublicKey,
    signature::{check_message_count, compute_b, domain_term, BBSplusSignature},
};
use crate::{
    bls12381::{
        constants::{G1_COMPRESSED_BYTES, SCALAR_BYTES},
        g1::CurvePoint,
        pairing::{g2_generator, pairing_product_is_identity},
        scalar::{hash_to_scalar, Scalar},
    },
    errors::Error,
    schemes::{algorithms::BBSplus, generics::PoKSignature},
    utils::{
        message::BBSplusMessage,
        util::{get_messages, get_remaining_indexes, i2osp, normalize_indexes},
    },
};

/// Zero-knowledge proof of knowledge of a signature, disclosing a subset of the messages.
///
/// `commitments` and `m_hat` hold one entry per hidden message, in increasing index order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplusPoKSignature {
    Abar: CurvePoint,
    Bbar: CurvePoint,
    D: CurvePoint,
    r2_hat: Scalar,
    r3_hat: Scalar,
    e_hat: Scalar,
    s_hat: Scalar,
    commitments: Vec<CurvePoint>,
    challenge: Scalar,
    m_hat: Vec<Scalar>,
}

/// Fixed part of the encoding: `Abar ‖ Bbar ‖ D ‖ r2_hat ‖ r3_hat ‖ e_hat ‖ s_hat` and the
/// challenge.
const FIXED_PROOF_BYTES: usize = 3 * G1_COMPRESSED_BYTES + 5 * SCALAR_BYTES;
const PER_HIDDEN_BYTES: usize = G1_COMPRESSED_BYTES + SCALAR_BYTES;

impl BBSplusPoKSignature {
    /// Number of hidden messages.
    pub fn hidden_count(&self) -> usize {
        self.m_hat.len()
    }

    pub fn challenge(&self) -> &Scalar {
        &self.challenge
    }

    pub fn commitments(&self) -> &[CurvePoint] {
        &self.commitments
    }

    /// `Abar ‖ Bbar ‖ D ‖ r2_hat ‖ r3_hat ‖ e_hat ‖ s_hat ‖ C_1..C_U ‖ challenge ‖ m_hat_1..m_hat_U`,
    /// `304 + 80·U` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FIXED_PROOF_BYTES + PER_HIDDEN_BYTES * self.hidden_count());

        bytes.extend_from_slice(&self.Abar.to_compressed());
        bytes.extend_from_slice(&self.Bbar.to_compressed());
        bytes.extend_from_slice(&self.D.to_compressed());
        bytes.extend_from_slice(&self.r2_hat.to_bytes());
        bytes.extend_from_slice(&self.r3_hat.to_bytes());
        bytes.extend_from_slice(&self.e_hat.to_bytes());
        bytes.extend_from_slice(&self.s_hat.to_bytes());
        self.commitments.iter().for_each(|c| bytes.extend_from_slice(&c.to_compressed()));
        bytes.extend_from_slice(&self.challenge.to_bytes());
        self.m_hat.iter().for_each(|m| bytes.extend_from_slice(&m.to_bytes()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < FIXED_PROOF_BYTES || (bytes.len() - FIXED_PROOF_BYTES) % PER_HIDDEN_BYTES != 0 {
            return Err(Error::DeserializationError(format!("invalid proof length {}", bytes.len())));
        }
        let U = (bytes.len() - FIXED_PROOF_BYTES) / PER_HIDDEN_BYTES;

        let mut rest = bytes;
        let Abar = CurvePoint::from_compressed(take(&mut rest, G1_COMPRESSED_BYTES))?;
        let Bbar = CurvePoint::from_compressed(take(&mut rest, G1_COMPRESSED_BYTES))?;
        let D = CurvePoint::from_compressed(take(&mut rest, G1_COMPRESSED_BYTES))?;
        let r2_hat = Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?;
        let r3_hat = Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?;
        let e_hat = Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?;
        let s_hat = Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?;

        let mut commitments = Vec::with_capacity(U);
        for _ in 0..U {
            commitments.push(CurvePoint::from_compressed(take(&mut rest, G1_COMPRESSED_BYTES))?);
        }
        let challenge = Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?;
        let mut m_hat = Vec::with_capacity(U);
        for _ in 0..U {
            m_hat.push(Scalar::from_bytes(take(&mut rest, SCALAR_BYTES))?);
        }

        Ok(Self { Abar, Bbar, D, r2_hat, r3_hat, e_hat, s_hat, commitments, challenge, m_hat })
    }
}

/// Splits `len` bytes off the front of `rest`. The caller has checked the total length.
fn take<'a>(rest: &mut &'a [u8], len: usize) -> &'a [u8] {
    let current: &'a [u8] = *rest;
    let (head, tail) = current.split_at(len);
    *rest = tail;
    head
}

/// What a verifier learns from a proof: the disclosed messages with their positions and the
/// size of the signed message list.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DisclosedInfo {
    pub messages: Vec<Vec<u8>>,
    pub indexes: Vec<usize>,
    pub hidden_count: usize,
    pub total_count: usize,
}

impl<CS: BbsCiphersuite> PoKSignature<BBSplus<CS>> {
    /// Proves knowledge of `signature` over `messages`, disclosing the messages at
    /// `disclosed_indexes`. Indexes are sorted and duplicates collapsed.
    pub fn proof_gen(
        signature: &BBSplusSignature,
        pk: &BBSplusPublicKey,
        messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
        header: Option<&[u8]>,
        nonce: Option<&[u8]>,
    ) -> Result<Self, Error> {
        Self::proof_gen_with_rng(signature, pk, messages, disclosed_indexes, header, nonce, &mut thread_rng())
    }

    pub fn proof_gen_with_rng<R: RngCore + CryptoRng>(
        signature: &BBSplusSignature,
        pk: &BBSplusPublicKey,
        messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
        header: Option<&[u8]>,
        nonce: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        check_message_count(messages.len())?;
        let disclosed_indexes = normalize_indexes(messages.len(), disclosed_indexes)?;

        let message_scalars = BBSplusMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(messages.len())?;

        let proof = core_proof_gen::<CS, R>(
            pk,
            signature,
            &generators,
            messages,
            &message_scalars,
            &disclosed_indexes,
            header,
            nonce,
            rng,
        )?;

        Ok(Self::BBSplus(proof))
    }

    /// Proof that discloses no message.
    pub fn create_possession_proof(
        signature: &BBSplusSignature,
        pk: &BBSplusPublicKey,
        messages: &[Vec<u8>],
        header: Option<&[u8]>,
        nonce: Option<&[u8]>,
    ) -> Result<Self, Error> {
        Self::proof_gen(signature, pk, messages, &[], header, nonce)
    }

    /// Proof that discloses every message.
    pub fn create_full_disclosure_proof(
        signature: &BBSplusSignature,
        pk: &BBSplusPublicKey,
        messages: &[Vec<u8>],
        header: Option<&[u8]>,
        nonce: Option<&[u8]>,
    ) -> Result<Self, Error> {
        let all: Vec<usize> = (0..messages.len()).collect();
        Self::proof_gen(signature, pk, messages, &all, header, nonce)
    }

    /// `disclosed_messages[k]` must be the message at `disclosed_indexes[k]`. `Ok(false)` for
    /// any proof that does not verify; `Err` only for malformed input.
    pub fn proof_verify(
        &self,
        pk: &BBSplusPublicKey,
        disclosed_messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
        header: Option<&[u8]>,
        nonce: Option<&[u8]>,
    ) -> Result<bool, Error> {
        let proof = self.to_bbsplus_proof();
        let info = disclosed_info(proof, disclosed_messages, disclosed_indexes)?;

        let disclosed_message_scalars = BBSplusMessage::messages_to_scalar::<CS>(&info.messages)?;
        let generators = Generators::create::<CS>(info.total_count)?;

        core_proof_verify::<CS>(
            pk,
            proof,
            &generators,
            header,
            nonce,
            &info.messages,
            &disclosed_message_scalars,
            &info.indexes,
        )
    }

    /// Validates the disclosure against the proof and returns it in index order.
    pub fn extract_disclosed_info(&self, disclosed_messages: &[Vec<u8>], disclosed_indexes: &[usize]) -> Result<DisclosedInfo, Error> {
        disclosed_info(self.to_bbsplus_proof(), disclosed_messages, disclosed_indexes)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bbsplus_proof().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::BBSplus(BBSplusPoKSignature::from_bytes(bytes)?))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded).map_err(|e| Error::DeserializationError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bbsplus_proof(&self) -> &BBSplusPoKSignature {
        match self {
            Self::BBSplus(inner) => inner,
            Self::_Unreachable(never, _) => match *never {},
        }
    }
}

fn disclosed_info(proof: &BBSplusPoKSignature, disclosed_messages: &[Vec<u8>], disclosed_indexes: &[usize]) -> Result<DisclosedInfo, Error> {
    let R = disclosed_indexes.len();
    if disclosed_messages.len() != R {
        return Err(Error::InvalidInput(format!(
            "{} disclosed messages for {R} disclosed indexes",
            disclosed_messages.len()
        )));
    }

    let U = proof.hidden_count();
    let L = U + R;
    check_message_count(L)?;

    let mut disclosed: Vec<(usize, &Vec<u8>)> = disclosed_indexes.iter().copied().zip(disclosed_messages).collect();
    disclosed.sort_by_key(|(i, _)| *i);

    if disclosed.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(Error::InvalidInput("duplicate disclosed index".to_owned()));
    }
    if let Some((invalid, _)) = disclosed.iter().find(|(i, _)| *i >= L) {
        return Err(Error::InvalidInput(format!("disclosed index {invalid} out of range for {L} messages")));
    }

    Ok(DisclosedInfo {
        indexes: disclosed.iter().map(|(i, _)| *i).collect(),
        messages: disclosed.into_iter().map(|(_, m)| m.clone()).collect(),
        hidden_count: U,
        total_count: L,
    })
}

struct ProofInitResult {
    Abar: CurvePoint,
    Bbar: CurvePoint,
    D: CurvePoint,
    T1: CurvePoint,
    T2: CurvePoint,
    commitments: Vec<CurvePoint>,
}

/// Secret values of one proof: the rerandomization and the Schnorr blindings.
struct ProofRandomness {
    r1: Scalar,
    r2: Scalar,
    rho_e: Scalar,
    rho_2: Scalar,
    rho_3: Scalar,
    rho_s: Scalar,
    rho_m: Vec<Scalar>,
}

impl ProofRandomness {
    fn sample<R: RngCore + CryptoRng>(hidden: usize, rng: &mut R) -> Self {
        Self {
            r1: Scalar::random_with_rng(rng),
            r2: Scalar::random_with_rng(rng),
            rho_e: Scalar::random_with_rng(rng),
            rho_2: Scalar::random_with_rng(rng),
            rho_3: Scalar::random_with_rng(rng),
            rho_s: Scalar::random_with_rng(rng),
            rho_m: (0..hidden).map(|_| Scalar::random_with_rng(rng)).collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn core_proof_gen<CS, R>(
    pk: &BBSplusPublicKey,
    signature: &BBSplusSignature,
    generators: &Generators,
    messages: &[Vec<u8>],
    message_scalars: &[BBSplusMessage],
    disclosed_indexes: &[usize],
    header: Option<&[u8]>,
    nonce: Option<&[u8]>,
    rng: &mut R,
) -> Result<BBSplusPoKSignature, Error>
where
    CS: BbsCiphersuite,
    R: RngCore + CryptoRng,
{
    let L = messages.len();
    let undisclosed_indexes = get_remaining_indexes(L, disclosed_indexes);

    let disclosed_messages = get_messages(messages, disclosed_indexes)?;
    let undisclosed_scalars = get_messages(message_scalars, &undisclosed_indexes)?;

    let randomness = ProofRandomness::sample(undisclosed_indexes.len(), rng);

    let init_res = proof_init::<CS>(signature, generators, &randomness, header, message_scalars, &undisclosed_indexes)?;

    let challenge = proof_challenge_calculate::<CS>(&init_res, pk, L, header, nonce, disclosed_indexes, &disclosed_messages)?;

    proof_finalize(init_res, challenge, signature, &randomness, &undisclosed_scalars)
}

fn proof_init<CS>(
    signature: &BBSplusSignature,
    generators: &Generators,
    randomness: &ProofRandomness,
    header: Option<&[u8]>,
    messages: &[BBSplusMessage],
    undisclosed_indexes: &[usize],
) -> Result<ProofInitResult, Error>
where
    CS: BbsCiphersuite,
{
    let h0 = &generators.blinding;

    // b = B + s·h0 = (SK + e)·A
    let b = compute_b::<CS>(generators, header, messages)? + h0 * &signature.s;

    let r1b = &b * &randomness.r1;
    let Abar = &signature.a * &randomness.r1;
    let Bbar = &r1b - &(&Abar * &signature.e);
    let D = &r1b - &(h0 * &randomness.r2);

    let T1 = &(h0 * &randomness.rho_2) - &(&Abar * &randomness.rho_e);
    let T2 = &(&D * &randomness.rho_3) - &(h0 * &randomness.rho_s);

    let commitments = undisclosed_indexes
        .iter()
        .zip(&randomness.rho_m)
        .map(|(&j, rho_j)| &generators.message_generators[j] * rho_j)
        .collect();

    Ok(ProofInitResult { Abar, Bbar, D, T1, T2, commitments })
}

/// challenge = hash_to_scalar(Abar ‖ Bbar ‖ D ‖ T1 ‖ T2 ‖ PK ‖ I2OSP(L, 8) ‖
///     I2OSP(len(header), 8) ‖ header ‖ I2OSP(len(nonce), 8) ‖ nonce ‖ I2OSP(R, 8) ‖
///     (I2OSP(i, 8) ‖ I2OSP(len(msg_i), 8) ‖ msg_i)* ‖ C_1 ‖ ... ‖ C_U)
fn proof_challenge_calculate<CS>(
    init_res: &ProofInitResult,
    pk: &BBSplusPublicKey,
    L: usize,
    header: Option<&[u8]>,
    nonce: Option<&[u8]>,
    disclosed_indexes: &[usize],
    disclosed_messages: &[Vec<u8>],
) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
{
    let R = disclosed_indexes.len();
    if disclosed_messages.len() != R {
        return Err(Error::InvalidInput(
            "Number of disclosed indexes different from number of disclosed messages".to_owned(),
        ));
    }

    let header = header.unwrap_or(b"");
    let nonce = nonce.unwrap_or(b"");

    let mut c_arr: Vec<u8> = Vec::new();
    c_arr.extend_from_slice(&init_res.Abar.to_compressed());
    c_arr.extend_from_slice(&init_res.Bbar.to_compressed());
    c_arr.extend_from_slice(&init_res.D.to_compressed());
    c_arr.extend_from_slice(&init_res.T1.to_compressed());
    c_arr.extend_from_slice(&init_res.T2.to_compressed());
    c_arr.extend_from_slice(&pk.to_bytes());
    c_arr.extend_from_slice(&i2osp(L, 8));
    c_arr.extend_from_slice(&i2osp(header.len(), 8));
    c_arr.extend_from_slice(header);
    c_arr.extend_from_slice(&i2osp(nonce.len(), 8));
    c_arr.extend_from_slice(nonce);
    c_arr.extend_from_slice(&i2osp(R, 8));
    for (&i, msg) in disclosed_indexes.iter().zip(disclosed_messages) {
        c_arr.extend_from_slice(&i2osp(i, 8));
        c_arr.extend_from_slice(&i2osp(msg.len(), 8));
        c_arr.extend_from_slice(msg);
    }
    init_res.commitments.iter().for_each(|c| c_arr.extend_from_slice(&c.to_compressed()));

    hash_to_scalar(&c_arr, &CS::challenge_dst())
}

fn proof_finalize(
    init_res: ProofInitResult,
    challenge: Scalar,
    signature: &BBSplusSignature,
    randomness: &ProofRandomness,
    undisclosed_messages: &[BBSplusMessage],
) -> Result<BBSplusPoKSignature, Error> {
    let r3 = randomness
        .r1
        .invert()
        .map_err(|_| Error::ProofGenError("Invert scalar failed".to_owned()))?;

    // s' = s - r2·r3
    let s_prime = &signature.s - &(&randomness.r2 * &r3);

    let r2_hat = &randomness.rho_2 + &(&challenge * &randomness.r2);
    let r3_hat = &randomness.rho_3 + &(&challenge * &r3);
    let e_hat = &randomness.rho_e + &(&challenge * &signature.e);
    let s_hat = &randomness.rho_s + &(&challenge * &s_prime);

    let m_hat = randomness
        .rho_m
        .iter()
        .zip(undisclosed_messages)
        .map(|(rho_j, m_j)| rho_j + &(&challenge * &m_j.value))
        .collect();

    Ok(BBSplusPoKSignature {
        Abar: init_res.Abar,
        Bbar: init_res.Bbar,
        D: init_res.D,
        r2_hat,
        r3_hat,
        e_hat,
        s_hat,
        commitments: init_res.commitments,
        challenge,
        m_hat,
    })
}

#[allow(clippy::too_many_arguments)]
fn core_proof_verify<CS>(
    pk: &BBSplusPublicKey,
    proof: &BBSplusPoKSignature,
    generators: &Generators,
    header: Option<&[u8]>,
    nonce: Option<&[u8]>,
    disclosed_messages: &[Vec<u8>],
    disclosed_message_scalars: &[BBSplusMessage],
    disclosed_indexes: &[usize],
) -> Result<bool, Error>
where
    CS: BbsCiphersuite,
{
    if !structurally_valid(proof) {
        return Ok(false);
    }

    let L = generators.message_generators.len();
    let init_res = proof_verify_init::<CS>(proof, generators, header, disclosed_message_scalars, disclosed_indexes)?;

    let challenge = proof_challenge_calculate::<CS>(&init_res, pk, L, header, nonce, disclosed_indexes, disclosed_messages)?;

    if proof.challenge != challenge {
        log::debug!("proof rejected: invalid challenge");
        return Ok(false);
    }

    // e(Abar, W) · e(-Bbar, P2) == 1
    let minus_bbar = -&proof.Bbar;
    let p2 = g2_generator();
    let valid = pairing_product_is_identity(&[(&proof.Abar, &pk.w), (&minus_bbar, &p2)])?;
    if !valid {
        log::debug!("proof rejected: pairing equation does not hold");
    }
    Ok(valid)
}

fn structurally_valid(proof: &BBSplusPoKSignature) -> bool {
    if proof.commitments.len() != proof.m_hat.len() {
        log::debug!("proof rejected: {} commitments for {} responses", proof.commitments.len(), proof.m_hat.len());
        return false;
    }

    let points_on_curve = [&proof.Abar, &proof.Bbar, &proof.D]
        .into_iter()
        .chain(proof.commitments.iter())
        .all(CurvePoint::is_on_curve);
    if !points_on_curve {
        log::debug!("proof rejected: point off the curve");
        return false;
    }
    if proof.Abar.is_infinity() || proof.Bbar.is_infinity() {
        log::debug!("proof rejected: Abar or Bbar is the identity");
        return false;
    }
    if ![&proof.Abar, &proof.Bbar, &proof.D].into_iter().all(CurvePoint::is_torsion_free) {
        log::debug!("proof rejected: Abar, Bbar or D outside the prime-order subgroup");
        return false;
    }

    let scalars_nonzero = [&proof.r2_hat, &proof.r3_hat, &proof.e_hat, &proof.s_hat, &proof.challenge]
        .into_iter()
        .chain(proof.m_hat.iter())
        .all(|s| !s.is_zero());
    if !scalars_nonzero {
        log::debug!("proof rejected: zero scalar");
    }
    scalars_nonzero
}

fn proof_verify_init<CS>(
    proof: &BBSplusPoKSignature,
    generators: &Generators,
    header: Option<&[u8]>,
    disclosed_messages: &[BBSplusMessage],
    disclosed_indexes: &[usize],
) -> Result<ProofInitResult, Error>
where
    CS: BbsCiphersuite,
{
    let L = generators.message_generators.len();
    let undisclosed_indexes = get_remaining_indexes(L, disclosed_indexes);
    let h0 = &generators.blinding;
    let c = &proof.challenge;

    // T1 = -e_hat·Abar + r2_hat·h0 - c·(Bbar - D)
    let T1 = &(&(h0 * &proof.r2_hat) - &(&proof.Abar * &proof.e_hat)) - &(&(&proof.Bbar - &proof.D) * c);

    // Bv = P1 + Q·domain + Σ_disclosed H_i·m_i
    let mut Bv = generators.g1_base_point.clone();
    if let Some(term) = domain_term::<CS>(generators, header)? {
        Bv = Bv + term;
    }
    for (&i, m_i) in disclosed_indexes.iter().zip(disclosed_messages) {
        Bv = Bv + &generators.message_generators[i] * &m_i.value;
    }

    // T2 = r3_hat·D - s_hat·h0 - Σ m_hat_j·H_j + Σ C_j - c·Bv
    let mut T2 = &(&proof.D * &proof.r3_hat) - &(h0 * &proof.s_hat);
    for ((&j, m_hat_j), C_j) in undisclosed_indexes.iter().zip(&proof.m_hat).zip(&proof.commitments) {
        T2 = T2 - &generators.message_generators[j] * m_hat_j + C_j.clone();
    }
    T2 = T2 - &Bv * c;

    Ok(ProofInitResult {
        Abar: proof.Abar.clone(),
        Bbar: proof.Bbar.clone(),
        D: proof.D.clone(),
        T1,
        T2,
        commitments: proof.commitments.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bls12381::field::Fp,
        keys::pair::KeyPair,
        schemes::{algorithms::BbsBls12381Sha256, generics::Signature},
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (KeyPair<BbsBls12381Sha256>, Vec<Vec<u8>>, Signature<BbsBls12381Sha256>) {
        let keypair = KeyPair::<BbsBls12381Sha256>::generate(&[11u8; 32], None, None).unwrap();
        let messages = vec![b"m0".to_vec(), b"m1".to_vec(), b"m2".to_vec()];
        let signature =
            Signature::<BbsBls12381Sha256>::sign(&messages, keypair.private_key(), keypair.public_key(), None).unwrap();
        (keypair, messages, signature)
    }

    #[test]
    fn proof_size_and_bytes() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::proof_gen(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            &[1],
            None,
            Some(&b"nonce"[..]),
        )
        .unwrap();

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), 304 + 80 * 2);
        assert_eq!(PoKSignature::<BbsBls12381Sha256>::from_bytes(&bytes).unwrap(), proof);
        assert_eq!(PoKSignature::<BbsBls12381Sha256>::decode(&proof.encode()).unwrap(), proof);
        assert!(PoKSignature::<BbsBls12381Sha256>::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn seeded_proofs_are_reproducible_and_unlinkable() {
        let (keypair, messages, signature) = setup();
        let prove = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            PoKSignature::<BbsBls12381Sha256>::proof_gen_with_rng(
                signature.bbsPlusSignature(),
                keypair.public_key(),
                &messages,
                &[0],
                None,
                None,
                &mut rng,
            )
            .unwrap()
        };
        let a = prove(1);
        assert_eq!(a, prove(1));

        let b = prove(2);
        assert_ne!(a.to_bbsplus_proof().Abar, b.to_bbsplus_proof().Abar);
        assert_ne!(a.to_bbsplus_proof().Abar, *signature.a());
    }

    #[test]
    fn disclosed_indexes_sorted_and_deduplicated() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::proof_gen(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            &[2, 0, 2],
            None,
            None,
        )
        .unwrap();
        assert_eq!(proof.to_bbsplus_proof().hidden_count(), 1);

        // the verifier may list disclosures in any order, as long as they correspond
        let ok = proof
            .proof_verify(keypair.public_key(), &[messages[2].clone(), messages[0].clone()], &[2, 0], None, None)
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn small_order_points_do_not_verify() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::proof_gen(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            &[0],
            None,
            None,
        )
        .unwrap();

        // (0, 2) is on the curve with order 3
        let small = CurvePoint::from_affine(Fp::zero(), Fp::from_u64(2)).unwrap();
        for field in 0..3 {
            let mut inner = proof.to_bbsplus_proof().clone();
            match field {
                0 => inner.Abar = small.clone(),
                1 => inner.Bbar = small.clone(),
                _ => inner.D = small.clone(),
            }
            let tampered = PoKSignature::<BbsBls12381Sha256>::BBSplus(inner);
            let res = tampered.proof_verify(keypair.public_key(), &[messages[0].clone()], &[0], None, None);
            assert_eq!(res, Ok(false));
        }
    }

    #[test]
    fn verifier_input_validation() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::proof_gen(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            &[0, 1],
            None,
            None,
        )
        .unwrap();
        let pk = keypair.public_key();

        let mismatched = proof.proof_verify(pk, &[messages[0].clone()], &[0, 1], None, None);
        assert!(matches!(mismatched, Err(Error::InvalidInput(_))));

        let duplicate = proof.proof_verify(pk, &[messages[0].clone(), messages[0].clone()], &[0, 0], None, None);
        assert!(matches!(duplicate, Err(Error::InvalidInput(_))));

        let out_of_range = proof.proof_verify(pk, &[messages[0].clone(), messages[1].clone()], &[0, 3], None, None);
        assert!(matches!(out_of_range, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn zero_response_rejected() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::create_full_disclosure_proof(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            None,
            None,
        )
        .unwrap();

        let mut inner = proof.to_bbsplus_proof().clone();
        inner.e_hat = Scalar::zero();
        let tampered = PoKSignature::<BbsBls12381Sha256>::BBSplus(inner);
        assert!(!tampered.proof_verify(keypair.public_key(), &messages, &[0, 1, 2], None, None).unwrap());
    }

    #[test]
    fn disclosed_info_reports_counts() {
        let (keypair, messages, signature) = setup();
        let proof = PoKSignature::<BbsBls12381Sha256>::proof_gen(
            signature.bbsPlusSignature(),
            keypair.public_key(),
            &messages,
            &[1],
            None,
            None,
        )
        .unwrap();

        let info = proof.extract_disclosed_info(&[messages[1].clone()], &[1]).unwrap();
        assert_eq!(
            info,
            DisclosedInfo { messages: vec![messages[1].clone()], indexes: vec![1], hidden_count: 2, total_count: 3 }
        );
    }
}
