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

//! BBS+ signatures with the `(A, e, s)` signature form, verified with a pairing, and
//! zero-knowledge proofs of knowledge of a signature that disclose a chosen subset of the
//! signed messages.
//!
//! - **Multi-message signatures**: one signature covers an ordered list of messages, each
//!   message bound to its own generator.
//! - **Selective disclosure**: a proof reveals only the chosen messages; hidden messages are
//!   replaced by Schnorr responses.
//! - **Unlinkability**: every proof rerandomizes the signature, so two proofs derived from the
//!   same signature cannot be correlated.
//! - **Session binding**: a verifier nonce and the signing domain enter the Fiat-Shamir
//!   challenge.

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for generators
pub mod generators;
/// Module for keys
pub mod keys;
/// Module for proofs
pub mod proof;
/// Module for signatures
pub mod signature;

#[cfg(test)]
mod tests;
