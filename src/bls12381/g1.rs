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

//! Points of the BLS12-381 G1 curve `y^2 = x^3 + 4` in homogeneous projective coordinates,
//! where `(X : Y : Z)` stands for the affine point `(X/Z, Y/Z)` and `Z = 0` is the identity.

use core::{
    fmt,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
};
use num_bigint::{BigInt, BigUint, Sign};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::sync::OnceLock;

use super::{
    constants::{curve_order, g1_cofactor, CURVE_B, G1_COMPRESSED_BYTES, G1_GENERATOR_X, G1_GENERATOR_Y},
    field::Fp,
    scalar::Scalar,
};
use crate::errors::Error;

const COMPRESSION_FLAG: u8 = 0x80;
const INFINITY_FLAG: u8 = 0x40;
const SIGN_FLAG: u8 = 0x20;

/// Affine view of a [`CurvePoint`]. The identity is `(0, 0)` with `infinity` set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: Fp,
    pub y: Fp,
    pub infinity: bool,
}

#[derive(Clone)]
pub struct CurvePoint {
    x: Fp,
    y: Fp,
    z: Fp,
}

fn curve_b() -> Fp {
    Fp::from_u64(CURVE_B)
}

impl CurvePoint {
    pub fn identity() -> Self {
        CurvePoint { x: Fp::zero(), y: Fp::one(), z: Fp::zero() }
    }

    /// The fixed generator P1.
    pub fn generator() -> Self {
        static GENERATOR: OnceLock<CurvePoint> = OnceLock::new();
        GENERATOR
            .get_or_init(|| CurvePoint::from_affine_unchecked(Fp::from_hex(G1_GENERATOR_X), Fp::from_hex(G1_GENERATOR_Y)))
            .clone()
    }

    pub(crate) fn from_affine_unchecked(x: Fp, y: Fp) -> Self {
        CurvePoint { x, y, z: Fp::one() }
    }

    pub(crate) fn from_projective_unchecked(x: Fp, y: Fp, z: Fp) -> Self {
        CurvePoint { x, y, z }
    }

    /// Builds a point from affine coordinates, rejecting coordinates off the curve.
    pub fn from_affine(x: Fp, y: Fp) -> Result<Self, Error> {
        let point = Self::from_affine_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::InvalidPointEncoding("point is not on the curve".to_owned()))
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn to_affine(&self) -> AffinePoint {
        match self.z.invert() {
            Ok(z_inv) => AffinePoint { x: &self.x * &z_inv, y: &self.y * &z_inv, infinity: false },
            Err(_) => AffinePoint { x: Fp::zero(), y: Fp::zero(), infinity: true },
        }
    }

    /// Cross-multiplied comparison, no inversion needed.
    pub fn equals(&self, other: &CurvePoint) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => true,
            (false, false) => {
                &self.x * &other.z == &other.x * &self.z && &self.y * &other.z == &other.y * &self.z
            }
            _ => false,
        }
    }

    pub fn add(&self, other: &CurvePoint) -> CurvePoint {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        let u1 = &self.x * &other.z;
        let u2 = &other.x * &self.z;
        let s1 = &self.y * &other.z;
        let s2 = &other.y * &self.z;

        if u1 == u2 {
            return if s1 == s2 { self.double() } else { CurvePoint::identity() };
        }

        let w = &self.z * &other.z;
        let h = &u2 - &u1;
        let r = &s2 - &s1;
        let h2 = h.square();
        let h3 = &h2 * &h;
        let u1h2 = &u1 * &h2;

        let a = &(&r.square() * &w) - &(&h3 + &u1h2.double());
        let x3 = &h * &a;
        let y3 = &(&r * &(&u1h2 - &a)) - &(&s1 * &h3);
        let z3 = &h3 * &w;

        CurvePoint { x: x3, y: y3, z: z3 }
    }

    /// Doubling for a = 0.
    pub fn double(&self) -> CurvePoint {
        if self.is_infinity() || self.y.is_zero() {
            return CurvePoint::identity();
        }

        let xx = self.x.square();
        let w = &(&xx + &xx) + &xx;
        let s = &self.y * &self.z;
        let b = &(&self.x * &self.y) * &s;
        let b4 = b.double().double();
        let h = &w.square() - &b4.double();
        let ss = s.square();

        let x3 = (&h * &s).double();
        let y3 = &(&w * &(&b4 - &h)) - &(&self.y.square() * &ss).double().double().double();
        let z3 = (&ss * &s).double().double().double();

        CurvePoint { x: x3, y: y3, z: z3 }
    }

    pub fn negate(&self) -> CurvePoint {
        if self.is_infinity() {
            return self.clone();
        }
        CurvePoint { x: self.x.clone(), y: -&self.y, z: self.z.clone() }
    }

    /// Double-and-add over the bits of `k`, most significant first.
    pub fn multiply_biguint(&self, k: &BigUint) -> CurvePoint {
        let mut acc = CurvePoint::identity();
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    pub fn multiply(&self, scalar: &Scalar) -> CurvePoint {
        self.multiply_biguint(scalar.value())
    }

    /// Signed multiplication: negative `k` multiplies the negated point by `|k|`.
    pub fn multiply_signed(&self, k: &BigInt) -> CurvePoint {
        let (sign, magnitude) = k.clone().into_parts();
        match sign {
            Sign::Minus => self.negate().multiply_biguint(&magnitude),
            _ => self.multiply_biguint(&magnitude),
        }
    }

    /// Affine check of `y^2 = x^3 + 4`. The identity is on the curve.
    pub fn is_on_curve(&self) -> bool {
        let affine = self.to_affine();
        if affine.infinity {
            return true;
        }
        affine.y.square() == &(&affine.x.square() * &affine.x) + &curve_b()
    }

    /// `r·P == O`, i.e. the point lies in the prime-order subgroup.
    pub fn is_torsion_free(&self) -> bool {
        self.multiply_biguint(curve_order()).is_infinity()
    }

    /// Multiplies by the full G1 cofactor h.
    pub fn clear_cofactor(&self) -> CurvePoint {
        self.multiply_biguint(g1_cofactor())
    }

    /// 48-byte compressed encoding: big-endian x with the compression flag, the infinity flag
    /// for the identity, and the sign flag when y is lexicographically largest.
    pub fn to_compressed(&self) -> [u8; G1_COMPRESSED_BYTES] {
        let affine = self.to_affine();
        if affine.infinity {
            let mut bytes = [0u8; G1_COMPRESSED_BYTES];
            bytes[0] = COMPRESSION_FLAG | INFINITY_FLAG;
            return bytes;
        }

        let mut bytes = affine.x.to_bytes();
        bytes[0] |= COMPRESSION_FLAG;
        if affine.y.lexicographically_largest() {
            bytes[0] |= SIGN_FLAG;
        }
        bytes
    }

    /// Inverse of [`CurvePoint::to_compressed`]; the result is checked to be on the curve and in
    /// the prime-order subgroup.
    ///
    /// # Errors
    /// [`Error::InvalidPointEncoding`] for any malformed or non-subgroup encoding.
    pub fn from_compressed(bytes: &[u8]) -> Result<CurvePoint, Error> {
        let bytes: &[u8; G1_COMPRESSED_BYTES] = bytes.try_into().map_err(|_| {
            Error::InvalidPointEncoding(format!("expected {G1_COMPRESSED_BYTES} bytes, got {}", bytes.len()))
        })?;

        let flags = bytes[0];
        if flags & COMPRESSION_FLAG == 0 {
            return Err(Error::InvalidPointEncoding("compression flag not set".to_owned()));
        }

        if flags & INFINITY_FLAG != 0 {
            let canonical = flags & !(COMPRESSION_FLAG | INFINITY_FLAG) == 0 && bytes[1..].iter().all(|&b| b == 0);
            if !canonical {
                return Err(Error::InvalidPointEncoding("non-canonical identity".to_owned()));
            }
            return Ok(CurvePoint::identity());
        }

        let mut x_bytes = *bytes;
        x_bytes[0] &= 0x1f;
        let x = Fp::from_bytes(&x_bytes)
            .ok_or_else(|| Error::InvalidPointEncoding("x coordinate not below the modulus".to_owned()))?;

        let rhs = &(&x.square() * &x) + &curve_b();
        let mut y = rhs
            .sqrt()
            .ok_or_else(|| Error::InvalidPointEncoding("x is not the abscissa of a curve point".to_owned()))?;

        if y.lexicographically_largest() != (flags & SIGN_FLAG != 0) {
            y = -y;
        }

        let point = CurvePoint::from_affine_unchecked(x, y);
        if !point.is_torsion_free() {
            return Err(Error::InvalidPointEncoding("point is not in the prime-order subgroup".to_owned()));
        }
        Ok(point)
    }
}

impl PartialEq for CurvePoint {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for CurvePoint {}

impl Default for CurvePoint {
    fn default() -> Self {
        CurvePoint::identity()
    }
}

impl fmt::Debug for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurvePoint({})", hex::encode(self.to_compressed()))
    }
}

impl<'a, 'b> Add<&'b CurvePoint> for &'a CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: &'b CurvePoint) -> CurvePoint {
        CurvePoint::add(self, rhs)
    }
}

impl Add<CurvePoint> for CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: CurvePoint) -> CurvePoint {
        CurvePoint::add(&self, &rhs)
    }
}

impl<'b> Add<&'b CurvePoint> for CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: &'b CurvePoint) -> CurvePoint {
        CurvePoint::add(&self, rhs)
    }
}

impl<'a, 'b> Sub<&'b CurvePoint> for &'a CurvePoint {
    type Output = CurvePoint;

    fn sub(self, rhs: &'b CurvePoint) -> CurvePoint {
        CurvePoint::add(self, &rhs.negate())
    }
}

impl Sub<CurvePoint> for CurvePoint {
    type Output = CurvePoint;

    fn sub(self, rhs: CurvePoint) -> CurvePoint {
        &self - &rhs
    }
}

impl<'a> Neg for &'a CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a CurvePoint {
    type Output = CurvePoint;

    fn mul(self, rhs: &'b Scalar) -> CurvePoint {
        self.multiply(rhs)
    }
}

impl<'b> Mul<&'b Scalar> for CurvePoint {
    type Output = CurvePoint;

    fn mul(self, rhs: &'b Scalar) -> CurvePoint {
        self.multiply(rhs)
    }
}

impl Sum for CurvePoint {
    fn sum<I: Iterator<Item = CurvePoint>>(iter: I) -> Self {
        iter.fold(CurvePoint::identity(), |acc, p| acc + p)
    }
}

impl Serialize for CurvePoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_compressed()))
    }
}

impl<'de> Deserialize<'de> for CurvePoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        CurvePoint::from_compressed(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const G1_COMPRESSED: &str = "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";

    #[test]
    fn generator_is_valid() {
        let g = CurvePoint::generator();
        assert!(g.is_on_curve());
        assert!(g.is_torsion_free());
        assert_eq!(hex::encode(g.to_compressed()), G1_COMPRESSED);
    }

    #[test]
    fn group_laws() {
        let g = CurvePoint::generator();
        let two_g = g.double();
        assert_eq!(&g + &g, two_g);
        assert_eq!(&two_g + &g, &g + &two_g);
        assert_eq!(&two_g - &g, g);
        assert_eq!(&g + &g.negate(), CurvePoint::identity());
        assert_eq!(&g + &CurvePoint::identity(), g);
        assert!(two_g.is_on_curve());

        let three = Scalar::from_u64(3);
        assert_eq!(g.multiply(&three), &two_g + &g);
        assert_eq!(g.multiply(&Scalar::zero()), CurvePoint::identity());
        assert_eq!(g.multiply(&-Scalar::one()), g.negate());
    }

    #[test]
    fn scalar_multiplication_distributes() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let a = Scalar::random_with_rng(&mut rng);
        let b = Scalar::random_with_rng(&mut rng);
        let g = CurvePoint::generator();
        assert_eq!(&g * &(&a + &b), &(&g * &a) + &(&g * &b));
        assert_eq!((&g * &a).multiply(&b), (&g * &b).multiply(&a));
    }

    #[test]
    fn signed_multiplication() {
        let g = CurvePoint::generator();
        assert_eq!(g.multiply_signed(&BigInt::from(-5)), g.multiply(&Scalar::from_u64(5)).negate());
        assert_eq!(g.multiply_signed(&BigInt::from(0)), CurvePoint::identity());
    }

    #[test]
    fn projective_equality_ignores_scaling() {
        let g = CurvePoint::generator();
        let k = Fp::from_u64(987654321);
        let scaled = CurvePoint::from_projective_unchecked(&g.x * &k, &g.y * &k, k);
        assert_eq!(scaled, g);
        assert_eq!(scaled.to_affine(), g.to_affine());
        assert_ne!(g, g.double());
    }

    #[test]
    fn identity_encoding() {
        let id = CurvePoint::identity();
        let bytes = id.to_compressed();
        assert_eq!(bytes[0], 0xc0);
        assert!(bytes[1..].iter().all(|&b| b == 0));
        assert_eq!(CurvePoint::from_compressed(&bytes).unwrap(), id);
        assert!(id.to_affine().infinity);
        assert!(id.is_on_curve());
    }

    #[test]
    fn compressed_round_trip_random_points() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let g = CurvePoint::generator();
        for _ in 0..100 {
            let p = &g * &Scalar::random_with_rng(&mut rng);
            let decoded = CurvePoint::from_compressed(&p.to_compressed()).unwrap();
            assert_eq!(decoded, p);
        }
    }

    #[test]
    fn malformed_encodings_are_rejected() {
        let mut bytes = CurvePoint::generator().to_compressed();

        assert!(matches!(CurvePoint::from_compressed(&bytes[..47]), Err(Error::InvalidPointEncoding(_))));

        bytes[0] &= !COMPRESSION_FLAG;
        assert!(matches!(CurvePoint::from_compressed(&bytes), Err(Error::InvalidPointEncoding(_))));

        let mut bad_identity = [0u8; 48];
        bad_identity[0] = 0xc0;
        bad_identity[47] = 1;
        assert!(CurvePoint::from_compressed(&bad_identity).is_err());

        let mut too_large = [0xffu8; 48];
        too_large[0] = 0x9f;
        assert!(CurvePoint::from_compressed(&too_large).is_err());
    }

    #[test]
    fn non_subgroup_point_is_rejected() {
        // (x, y) on the curve but outside G1: x = 0 gives y^2 = 4.
        let p = CurvePoint::from_affine(Fp::zero(), Fp::from_u64(2)).unwrap();
        assert!(!p.is_torsion_free());
        assert!(CurvePoint::from_compressed(&p.to_compressed()).is_err());
        assert!(p.clear_cofactor().is_torsion_free());
    }

    #[test]
    fn affine_construction_checks_curve() {
        assert!(CurvePoint::from_affine(Fp::one(), Fp::one()).is_err());
    }

    #[test]
    fn serde_uses_compressed_hex() {
        let g = CurvePoint::generator();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, format!("\"{G1_COMPRESSED}\""));
        let back: CurvePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
