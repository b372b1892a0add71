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

//! # zkcred
//!
//! BBS+ signatures over BLS12-381 with selective-disclosure zero-knowledge proofs of
//! possession, for anonymous credentials.
//!
//! The base field, the scalar field, the G1 group and hashing to G1 are implemented on
//! arbitrary-precision integers in [`bls12381`]. Keys, signatures and proofs live in
//! [`bbsplus`] and use `bls12_381_plus` for G2 and the pairing checks.
//!
//! ```toml
//! zkcred = { version = "0.1", features = ["bbsplus"] }
//! ```

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

/// Errors
pub mod errors;
/// Field, scalar and G1 arithmetic
pub mod bls12381;
/// Utilities
pub mod utils;

#[cfg(feature = "bbsplus")]
/// BBS+ keys, signatures and proofs
pub mod bbsplus;
#[cfg(feature = "bbsplus")]
/// Key pairs
pub mod keys;
#[cfg(feature = "bbsplus")]
/// Scheme markers and generic wrappers
pub mod schemes;

pub use bls12381::{g1::CurvePoint, scalar::Scalar};
pub use errors::Error;

#[cfg(feature = "bbsplus")]
pub use bbsplus::{keys::{BBSplusPublicKey, BBSplusSecretKey}, proof::DisclosedInfo};
#[cfg(feature = "bbsplus")]
pub use keys::pair::KeyPair;
#[cfg(feature = "bbsplus")]
pub use schemes::{
    algorithms::{BBSplus, BbsBls12381Sha256},
    generics::{PoKSignature, Signature},
};
