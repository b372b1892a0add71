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

use rand::{thread_rng, CryptoRng, RngCore};

/// `n` bytes from the thread-local CSPRNG. Used for verifier nonces and key material.
pub fn generate_random_secret(n: usize) -> Vec<u8> {
    random_bytes_with_rng(&mut thread_rng(), n)
}

pub fn random_bytes_with_rng<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; n];
    rng.fill_bytes(&mut bytes);
    bytes
}
