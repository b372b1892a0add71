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

use crate::errors::Error;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

/// base^exp mod modulus
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Multiplicative inverse of `a` modulo `modulus`, computed with the iterative extended
/// Euclidean algorithm.
///
/// # Errors
/// [`Error::ArithmeticError`] when `gcd(a, modulus) != 1`.
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::ArithmeticError("modulus is zero".to_owned()));
    }

    let m = BigInt::from(modulus.clone());
    let mut old_r = BigInt::from(a % modulus);
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::ArithmeticError(format!("gcd(a, modulus) = {old_r}")));
    }

    let mut inv = old_s % &m;
    if inv.is_negative() {
        inv += &m;
    }

    inv.to_biguint()
        .ok_or_else(|| Error::ArithmeticError("negative inverse".to_owned()))
}

/// OS2IP: big-endian bytes to a non-negative integer.
pub fn bytes_to_bigint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// I2OSP for big integers: fixed-width big-endian encoding.
///
/// # Errors
/// [`Error::InvalidInput`] if `n` does not fit in `len` bytes.
pub fn bigint_to_bytes(n: &BigUint, len: usize) -> Result<Vec<u8>, Error> {
    let bytes = if n.is_zero() { Vec::new() } else { n.to_bytes_be() };
    if bytes.len() > len {
        return Err(Error::InvalidInput(format!("integer does not fit in {len} bytes")));
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// [`bigint_to_bytes`] with the default scalar width of 32 bytes.
pub fn bigint_to_bytes32(n: &BigUint) -> Result<Vec<u8>, Error> {
    bigint_to_bytes(n, 32)
}

/// Fixed-width encoding of a value already known to be reduced below `2^(8N)`.
pub(crate) fn to_fixed_be<const N: usize>(n: &BigUint) -> [u8; N] {
    let bytes = n.to_bytes_be();
    let mut out = [0u8; N];
    let src = &bytes[bytes.len().saturating_sub(N)..];
    out[N - src.len()..].copy_from_slice(src);
    out
}

pub fn concat_bytes(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    parts.iter().for_each(|p| out.extend_from_slice(p));
    out
}

/// I2OSP for machine integers. Lengths above 8 are left-padded with zeros.
pub fn i2osp(value: usize, len: usize) -> Vec<u8> {
    let be = (value as u64).to_be_bytes();
    if len >= be.len() {
        let mut out = vec![0u8; len - be.len()];
        out.extend_from_slice(&be);
        out
    } else {
        be[be.len() - len..].to_vec()
    }
}

/// Indexes in `0..length` not contained in `indexes`, in increasing order.
pub fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    (0..length).filter(|i| !indexes.contains(i)).collect()
}

/// Elements of `messages` at `indexes`, in the order of `indexes`.
///
/// # Errors
/// [`Error::InvalidInput`] if an index does not address one of `messages`.
pub fn get_messages<T: Clone>(messages: &[T], indexes: &[usize]) -> Result<Vec<T>, Error> {
    indexes
        .iter()
        .map(|&i| {
            messages.get(i).cloned().ok_or_else(|| {
                Error::InvalidInput(format!("index {i} out of range for {} messages", messages.len()))
            })
        })
        .collect()
}

/// Sorts and deduplicates disclosure indexes, checking that each one addresses one of `length`
/// messages.
pub(crate) fn normalize_indexes(length: usize, indexes: &[usize]) -> Result<Vec<usize>, Error> {
    let mut indexes = indexes.to_vec();
    indexes.sort_unstable();
    indexes.dedup();

    if let Some(invalid) = indexes.iter().find(|&&i| i >= length) {
        return Err(Error::InvalidInput(format!(
            "disclosed index {invalid} out of range for {length} messages"
        )));
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_small_modulus() {
        let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(11u32)).unwrap();
        assert_eq!(inv, BigUint::from(4u32));
    }

    #[test]
    fn inverse_fails_without_coprimality() {
        let res = mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32));
        assert!(matches!(res, Err(Error::ArithmeticError(_))));

        let res = mod_inverse(&BigUint::zero(), &BigUint::from(7u32));
        assert!(matches!(res, Err(Error::ArithmeticError(_))));
    }

    #[test]
    fn inverse_times_value_is_one() {
        let m = crate::bls12381::constants::curve_order();
        let a = BigUint::from(0x1234_5678_9abc_def0u64);
        let inv = mod_inverse(&a, m).unwrap();
        assert!(((a * inv) % m).is_one());
    }

    #[test]
    fn mod_pow_matches_fermat() {
        let p = BigUint::from(1_000_000_007u64);
        let a = BigUint::from(123_456u32);
        let inv = mod_pow(&a, &(&p - BigUint::from(2u32)), &p);
        assert_eq!(inv, mod_inverse(&a, &p).unwrap());
    }

    #[test]
    fn fixed_width_encoding() {
        let n = BigUint::from(0x0102u32);
        assert_eq!(bigint_to_bytes(&n, 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(bigint_to_bytes32(&BigUint::zero()).unwrap(), vec![0u8; 32]);
        assert!(bigint_to_bytes(&n, 1).is_err());
        assert_eq!(bytes_to_bigint(&[0, 0, 1, 2]), n);
        assert_eq!(to_fixed_be::<3>(&n), [0, 1, 2]);
    }

    #[test]
    fn i2osp_widths() {
        assert_eq!(i2osp(258, 2), vec![1, 2]);
        assert_eq!(i2osp(5, 4), vec![0, 0, 0, 5]);
        assert_eq!(i2osp(1, 10), vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn index_helpers() {
        assert_eq!(get_remaining_indexes(5, &[0, 2]), vec![1, 3, 4]);
        assert_eq!(get_messages(&["a", "b", "c"], &[2, 0]).unwrap(), vec!["c", "a"]);
        assert!(matches!(get_messages(&["a", "b"], &[0, 2]), Err(Error::InvalidInput(_))));
        assert_eq!(normalize_indexes(4, &[3, 1, 1]).unwrap(), vec![1, 3]);
        assert!(matches!(normalize_indexes(2, &[2]), Err(Error::InvalidInput(_))));
        assert_eq!(concat_bytes(&[&b"ab"[..], &b""[..], &b"c"[..]]), b"abc".to_vec());
    }
}
