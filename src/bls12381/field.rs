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

use super::constants::{field_modulus, hex_to_biguint, p_minus_1_over_2, sqrt_exponent, FIELD_BYTES};
use crate::{
    errors::Error,
    utils::util::{mod_inverse, mod_pow, to_fixed_be},
};

/// Element of the BLS12-381 base field, always reduced modulo p.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Fp(pub(crate) BigUint);

impl_modular_ops!(Fp, field_modulus);

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp(0x{})", hex::encode(self.to_bytes()))
    }
}

impl Fp {
    pub fn zero() -> Self {
        Fp(BigUint::zero())
    }

    pub fn one() -> Self {
        Fp(BigUint::one())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    /// Reduces `value` modulo p.
    pub fn new(value: BigUint) -> Self {
        Fp(value % field_modulus())
    }

    pub(crate) fn from_hex(hex: &str) -> Self {
        Self::new(hex_to_biguint(hex))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn double(&self) -> Self {
        self + self
    }

    pub fn pow(&self, exp: &BigUint) -> Self {
        Fp(mod_pow(&self.0, exp, field_modulus()))
    }

    pub fn invert(&self) -> Result<Self, Error> {
        mod_inverse(&self.0, field_modulus()).map(Fp)
    }

    /// Inverse that maps zero to zero.
    pub fn inv0(&self) -> Self {
        self.invert().unwrap_or_else(|_| Fp::zero())
    }

    /// Euler's criterion. Zero counts as a square.
    pub fn is_square(&self) -> bool {
        self.is_zero() || self.pow(p_minus_1_over_2()).0.is_one()
    }

    /// Square root via the exponent (p + 1) / 4.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = self.pow(sqrt_exponent());
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    /// Parity of the canonical representative.
    pub fn sgn0(&self) -> bool {
        self.0.bit(0)
    }

    /// True when the element is larger than its negation, i.e. greater than (p - 1) / 2.
    pub fn lexicographically_largest(&self) -> bool {
        &self.0 > p_minus_1_over_2()
    }

    pub fn to_bytes(&self) -> [u8; FIELD_BYTES] {
        to_fixed_be(&self.0)
    }

    /// Canonical decoding, `None` for values not below p.
    pub fn from_bytes(bytes: &[u8; FIELD_BYTES]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        if &value < field_modulus() {
            Some(Fp(value))
        } else {
            None
        }
    }

    /// Reduces an arbitrary-length big-endian string modulo p.
    pub fn from_okm(okm: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(okm))
    }
}
