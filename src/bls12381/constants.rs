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

//! BLS12-381 G1 parameters, as big-endian hex strings.

use num_bigint::BigUint;
use num_traits::One;
use std::sync::OnceLock;

/// Base field modulus p (381 bits).
pub const FIELD_MODULUS: &str = "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab";

/// Prime order r of the G1 subgroup (255 bits).
pub const CURVE_ORDER: &str = "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

/// Affine x coordinate of the G1 generator P1.
pub const G1_GENERATOR_X: &str = "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";
/// Affine y coordinate of the G1 generator P1.
pub const G1_GENERATOR_Y: &str = "08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1";

/// b in y^2 = x^3 + b.
pub const CURVE_B: u64 = 4;

/// Cofactor of G1.
pub const G1_COFACTOR: &str = "396c8c005555e1568c00aaab0000aaab";

/// A' of the 11-isogenous curve E': y^2 = x^3 + A'x + B' used by simplified SWU.
pub const SSWU_A: &str = "144698a3b8e9433d693a02c96d4982b0ea985383ee66a8d8e8981aefd881ac98936f8da0e0f97f5cf428082d584c1d";
/// B' of the 11-isogenous curve.
pub const SSWU_B: &str = "12e2908d11688030018b12e8753eee3b2016c1f0f24f4070a0b9c14fcef35ef55a23215a316ceaa5d1cc48e98e172be0";
/// Non-square Z used by simplified SWU.
pub const SSWU_Z: u64 = 11;

/// Maximum number of messages a signature may cover.
pub const MAX_MESSAGES: usize = 2048;

/// Byte length of a compressed G1 point.
pub const G1_COMPRESSED_BYTES: usize = 48;
/// Byte length of a serialized scalar.
pub const SCALAR_BYTES: usize = 32;
/// Byte length of a serialized base field element.
pub const FIELD_BYTES: usize = 48;

pub(crate) fn hex_to_biguint(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap_or_default()
}

macro_rules! lazy_biguint {
    ($name:ident, $hex:expr) => {
        pub(crate) fn $name() -> &'static BigUint {
            static CELL: OnceLock<BigUint> = OnceLock::new();
            CELL.get_or_init(|| hex_to_biguint($hex))
        }
    };
}

lazy_biguint!(field_modulus, FIELD_MODULUS);
lazy_biguint!(curve_order, CURVE_ORDER);
lazy_biguint!(g1_cofactor, G1_COFACTOR);

/// (p + 1) / 4, the square root exponent (p ≡ 3 mod 4).
pub(crate) fn sqrt_exponent() -> &'static BigUint {
    static CELL: OnceLock<BigUint> = OnceLock::new();
    CELL.get_or_init(|| (field_modulus() + BigUint::one()) >> 2usize)
}

/// (p - 1) / 2, used by the Legendre symbol and the sign of compressed points.
pub(crate) fn p_minus_1_over_2() -> &'static BigUint {
    static CELL: OnceLock<BigUint> = OnceLock::new();
    CELL.get_or_init(|| (field_modulus() - BigUint::one()) >> 1usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_is_3_mod_4() {
        assert_eq!(field_modulus() % BigUint::from(4u32), BigUint::from(3u32));
        assert_eq!(field_modulus().bits(), 381);
        assert_eq!(curve_order().bits(), 255);
    }

    #[test]
    fn constants_parse() {
        assert_ne!(hex_to_biguint(SSWU_A), BigUint::default());
        assert_ne!(hex_to_biguint(SSWU_B), BigUint::default());
        assert_ne!(hex_to_biguint(G1_GENERATOR_X), BigUint::default());
        assert_ne!(hex_to_biguint(G1_GENERATOR_Y), BigUint::default());
    }
}
