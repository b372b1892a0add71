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

use thiserror::Error;

/// Errors raised by the library.
///
/// A failed verification is never an error: `verify` and `proof_verify` return `Ok(false)`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Modular inverse does not exist: {0}")]
    ArithmeticError(String),
    #[error("Invalid compressed point encoding: {0}")]
    InvalidPointEncoding(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Error during keypair generation: {0}")]
    KeyGenError(String),
    #[error("Invalid key: {0}")]
    KeyDeserializationError(String),
    #[error("Error during deserialization: {0}")]
    DeserializationError(String),
    #[error("Error during computation of a Signature: {0}")]
    SignatureGenerationError(String),
    #[error("Error during computation of a Proof of Knowledge of a Signature: {0}")]
    ProofGenError(String),
}
