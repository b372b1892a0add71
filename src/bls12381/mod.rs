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

//! BLS12-381 arithmetic on arbitrary-precision integers: the base field, the scalar field, the
//! G1 group in projective coordinates and hashing to G1.
//!
//! G2 and the pairing are not reimplemented here; the [`pairing`] module bridges G1 points and
//! scalars to the `bls12_381_plus` backend for the pairing checks.

#[macro_use]
mod arithmetic;

/// Curve parameters
pub mod constants;
/// Base field `Fp`
pub mod field;
/// G1 points
pub mod g1;
/// RFC 9380 hash-to-curve for G1
pub mod hash2curve;
/// Coefficients of the 11-isogeny used by the SWU map
pub mod isogeny;
#[cfg(feature = "bbsplus")]
/// Bridge to the pairing backend
pub mod pairing;
/// Scalar field `Fr`
pub mod scalar;
