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

//! Conversions from the native G1 and scalar types to `bls12_381_plus`, and the
//! multi-pairing check used by signature and proof verification.

use bls12_381_plus::{multi_miller_loop, G1Affine, G2Affine, G2Prepared, G2Projective, Scalar as BlsScalar};
use elliptic_curve::{group::Curve, Group};

use super::{g1::CurvePoint, scalar::Scalar};
use crate::errors::Error;

/// The fixed G2 generator `P2`.
pub fn g2_generator() -> G2Projective {
    G2Projective::GENERATOR
}

/// Re-encodes a G1 point for the pairing backend. Both sides use the same compressed format.
pub fn to_g1_affine(point: &CurvePoint) -> Result<G1Affine, Error> {
    Option::<G1Affine>::from(G1Affine::from_compressed(&point.to_compressed()))
        .ok_or_else(|| Error::InvalidPointEncoding("G1 point rejected by the pairing backend".to_owned()))
}

pub fn to_bls_scalar(scalar: &Scalar) -> Result<BlsScalar, Error> {
    Option::<BlsScalar>::from(BlsScalar::from_be_bytes(&scalar.to_bytes()))
        .ok_or_else(|| Error::DeserializationError("scalar rejected by the pairing backend".to_owned()))
}

/// `k·P2`
pub fn g2_mul(scalar: &Scalar) -> Result<G2Projective, Error> {
    Ok(G2Affine::generator() * to_bls_scalar(scalar)?)
}

pub fn g2_to_bytes(point: &G2Projective) -> [u8; G2Affine::COMPRESSED_BYTES] {
    point.to_affine().to_compressed()
}

pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2Projective, Error> {
    let bytes: [u8; G2Affine::COMPRESSED_BYTES] = bytes.try_into().map_err(|_| {
        Error::InvalidPointEncoding(format!("expected {} bytes for a G2 point", G2Affine::COMPRESSED_BYTES))
    })?;
    Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
        .map(G2Projective::from)
        .ok_or_else(|| Error::InvalidPointEncoding("invalid compressed G2 point".to_owned()))
}

/// Returns true when `Π e(P_i, Q_i)` is the identity of the target group.
pub fn pairing_product_is_identity(terms: &[(&CurvePoint, &G2Projective)]) -> Result<bool, Error> {
    let g1_points = terms
        .iter()
        .map(|(p, _)| to_g1_affine(p))
        .collect::<Result<Vec<_>, Error>>()?;
    let g2_points: Vec<G2Prepared> = terms.iter().map(|(_, q)| G2Prepared::from(q.to_affine())).collect();

    let pairs: Vec<(&G1Affine, &G2Prepared)> = g1_points.iter().zip(g2_points.iter()).collect();
    let pairing = multi_miller_loop(&pairs).final_exponentiation();

    Ok(pairing.is_identity().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_bridges_to_backend() {
        let g = to_g1_affine(&CurvePoint::generator()).unwrap();
        assert_eq!(g, G1Affine::generator());
        assert_eq!(to_g1_affine(&CurvePoint::identity()).unwrap(), G1Affine::identity());
    }

    #[test]
    fn scalar_multiplication_agrees_with_backend() {
        let k = Scalar::from_u64(0x1234_5678_9abc);
        let native = CurvePoint::generator().multiply(&k);
        let backend = G1Affine::generator() * to_bls_scalar(&k).unwrap();
        assert_eq!(to_g1_affine(&native).unwrap(), backend.to_affine());
    }

    #[test]
    fn bilinearity() {
        let a = Scalar::from_u64(17);
        let b = Scalar::from_u64(23);
        let ab = &a * &b;

        // e(a·P1, b·P2) · e(-(ab)·P1, P2) == 1
        let lhs = CurvePoint::generator().multiply(&a);
        let rhs = -CurvePoint::generator().multiply(&ab);
        let b_p2 = g2_mul(&b).unwrap();
        let p2 = g2_generator();
        assert!(pairing_product_is_identity(&[(&lhs, &b_p2), (&rhs, &p2)]).unwrap());

        let wrong = -CurvePoint::generator().multiply(&a);
        assert!(!pairing_product_is_identity(&[(&lhs, &b_p2), (&wrong, &p2)]).unwrap());
    }

    #[test]
    fn g2_bytes_round_trip() {
        let w = g2_mul(&Scalar::from_u64(99)).unwrap();
        assert_eq!(g2_from_bytes(&g2_to_bytes(&w)).unwrap(), w);
        assert!(g2_from_bytes(&[0u8; 95]).is_err());
    }
}
