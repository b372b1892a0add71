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

//! Hashing to G1 as in [RFC 9380](https://www.rfc-editor.org/rfc/rfc9380): `expand_message_xmd`
//! with SHA-256, the simplified SWU map onto the 11-isogenous curve E', the isogeny back to
//! the G1 curve and cofactor clearing.

use digest::Digest;
use sha2::Sha256;
use std::sync::OnceLock;

use super::{
    constants::{SSWU_A, SSWU_B, SSWU_Z},
    field::Fp,
    g1::CurvePoint,
    isogeny::{ISO_X_DEN, ISO_X_NUM, ISO_Y_DEN, ISO_Y_NUM},
};
use crate::{errors::Error, utils::util::i2osp};

/// SHA-256 output size.
const B_IN_BYTES: usize = 32;
/// SHA-256 block size.
const S_IN_BYTES: usize = 64;
/// Length of the uniform string fed to `hash_to_field` for one field element (L in RFC 9380).
const FIELD_ELEMENT_EXPAND_LEN: usize = 64;

/// Label prefixed to the big-endian index of each message generator.
pub const GENERATOR_LABEL: &[u8] = b"GENERATOR";

/// expand_message_xmd (RFC 9380, section 5.3.1) instantiated with SHA-256.
///
/// # Errors
/// [`Error::InvalidInput`] if `dst` exceeds 255 bytes, `len_in_bytes` exceeds 65535 or
/// more than 255 hash blocks would be needed.
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error> {
    let ell = (len_in_bytes + B_IN_BYTES - 1) / B_IN_BYTES;
    if ell > 255 || len_in_bytes > 65535 {
        return Err(Error::InvalidInput(format!("expand_message_xmd: len_in_bytes {len_in_bytes} too large")));
    }
    if dst.len() > 255 {
        return Err(Error::InvalidInput("expand_message_xmd: dst longer than 255 bytes".to_owned()));
    }

    let dst_prime = [dst, &i2osp(dst.len(), 1)].concat();

    let b_0 = Sha256::new()
        .chain_update([0u8; S_IN_BYTES])
        .chain_update(msg)
        .chain_update(i2osp(len_in_bytes, 2))
        .chain_update([0u8])
        .chain_update(&dst_prime)
        .finalize();

    let mut b_i = Sha256::new()
        .chain_update(b_0)
        .chain_update([1u8])
        .chain_update(&dst_prime)
        .finalize();

    let mut uniform_bytes = Vec::with_capacity(ell * B_IN_BYTES);
    uniform_bytes.extend_from_slice(&b_i);

    for i in 2..=ell {
        let xored: Vec<u8> = b_0.iter().zip(b_i.iter()).map(|(a, b)| a ^ b).collect();
        b_i = Sha256::new()
            .chain_update(xored)
            .chain_update(i2osp(i, 1))
            .chain_update(&dst_prime)
            .finalize();
        uniform_bytes.extend_from_slice(&b_i);
    }

    uniform_bytes.truncate(len_in_bytes);
    Ok(uniform_bytes)
}

struct SswuParams {
    a: Fp,
    b: Fp,
    z: Fp,
    /// -B / A
    minus_b_over_a: Fp,
    /// B / (Z * A)
    b_over_za: Fp,
}

fn sswu_params() -> &'static SswuParams {
    static PARAMS: OnceLock<SswuParams> = OnceLock::new();
    PARAMS.get_or_init(|| {
        let a = Fp::from_hex(SSWU_A);
        let b = Fp::from_hex(SSWU_B);
        let z = Fp::from_u64(SSWU_Z);
        let minus_b_over_a = -(&b * &a.inv0());
        let b_over_za = &b * &(&z * &a).inv0();
        SswuParams { a, b, z, minus_b_over_a, b_over_za }
    })
}

struct IsogenyMap {
    x_num: Vec<Fp>,
    x_den: Vec<Fp>,
    y_num: Vec<Fp>,
    y_den: Vec<Fp>,
}

fn isogeny_map() -> &'static IsogenyMap {
    static MAP: OnceLock<IsogenyMap> = OnceLock::new();
    MAP.get_or_init(|| {
        let parse = |coefficients: &[&str]| coefficients.iter().map(|c| Fp::from_hex(c)).collect();
        IsogenyMap {
            x_num: parse(&ISO_X_NUM),
            x_den: parse(&ISO_X_DEN),
            y_num: parse(&ISO_Y_NUM),
            y_den: parse(&ISO_Y_DEN),
        }
    })
}

/// Horner evaluation, coefficients lowest degree first.
fn eval_poly(coefficients: &[Fp], x: &Fp) -> Fp {
    coefficients
        .iter()
        .rev()
        .fold(Fp::zero(), |acc, c| &(&acc * x) + c)
}

/// Right-hand side of E': x^3 + A'x + B'.
fn iso_curve_rhs(x: &Fp, params: &SswuParams) -> Fp {
    &(&(&x.square() * x) + &(&params.a * x)) + &params.b
}

/// Simplified SWU onto E', returning affine coordinates on the isogenous curve.
fn map_to_isogenous_curve(u: &Fp) -> (Fp, Fp) {
    let params = sswu_params();

    let zu2 = &params.z * &u.square();
    let tv1 = (&zu2.square() + &zu2).inv0();

    let x1 = if tv1.is_zero() {
        params.b_over_za.clone()
    } else {
        &params.minus_b_over_a * &(&Fp::one() + &tv1)
    };
    let gx1 = iso_curve_rhs(&x1, params);

    let (x, mut y) = match gx1.sqrt() {
        Some(y1) => (x1, y1),
        None => {
            // gx1 * gx2 = Z^3 u^6 gx1^2 and Z is a non-square, so gx2 is a square here.
            let x2 = &zu2 * &x1;
            let gx2 = iso_curve_rhs(&x2, params);
            let y2 = gx2.sqrt();
            debug_assert!(y2.is_some(), "gx2 must be a square when gx1 is not");
            let y2 = y2.unwrap_or_default();
            (x2, y2)
        }
    };

    if u.sgn0() != y.sgn0() {
        y = -y;
    }
    (x, y)
}

/// Applies the 11-isogeny E' -> E. Points where a denominator vanishes map to the identity.
fn iso_map(x: &Fp, y: &Fp) -> CurvePoint {
    let map = isogeny_map();
    let x_num = eval_poly(&map.x_num, x);
    let x_den = eval_poly(&map.x_den, x);
    let y_num = eval_poly(&map.y_num, x);
    let y_den = eval_poly(&map.y_den, x);

    if x_den.is_zero() || y_den.is_zero() {
        return CurvePoint::identity();
    }

    // (x_num / x_den, y * y_num / y_den) with the common denominator as Z.
    CurvePoint::from_projective_unchecked(
        &x_num * &y_den,
        &(y * &y_num) * &x_den,
        &x_den * &y_den,
    )
}

/// Maps a field element to a point of the G1 curve (not yet in the prime-order subgroup).
pub fn map_to_curve(u: &Fp) -> CurvePoint {
    let (x, y) = map_to_isogenous_curve(u);
    iso_map(&x, &y)
}

/// `map_to_curve(u0) + map_to_curve(u1)` before cofactor clearing.
pub(crate) fn map_to_curve_sum(msg: &[u8], dst: &[u8]) -> Result<CurvePoint, Error> {
    let uniform_bytes = expand_message_xmd(msg, dst, 2 * FIELD_ELEMENT_EXPAND_LEN)?;
    let u0 = Fp::from_okm(&uniform_bytes[..FIELD_ELEMENT_EXPAND_LEN]);
    let u1 = Fp::from_okm(&uniform_bytes[FIELD_ELEMENT_EXPAND_LEN..]);
    Ok(map_to_curve(&u0) + map_to_curve(&u1))
}

/// Hashes `msg` to a point of the prime-order subgroup of G1 under the domain separation tag
/// `dst`.
pub fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Result<CurvePoint, Error> {
    Ok(map_to_curve_sum(msg, dst)?.clear_cofactor())
}

/// Returns a hasher bound to one domain separation tag.
pub fn create_hash_to_curve(dst: &[u8]) -> impl Fn(&[u8]) -> Result<CurvePoint, Error> {
    let dst = dst.to_vec();
    move |msg: &[u8]| hash_to_curve(msg, &dst)
}

/// `count` generators `H_i = hash_to_curve("GENERATOR" ‖ I2OSP(i, 4), dst)`, `i = 0..count`.
pub fn hash_to_generators(count: usize, dst: &[u8]) -> Result<Vec<CurvePoint>, Error> {
    (0..count)
        .map(|i| hash_to_curve(&[GENERATOR_LABEL, &i2osp(i, 4)].concat(), dst))
        .collect()
}
