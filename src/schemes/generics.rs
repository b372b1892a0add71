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

use super::algorithms::Scheme;
use core::{convert::Infallible, marker::PhantomData};
use serde::{Deserialize, Serialize};

use crate::bbsplus::{proof::BBSplusPoKSignature, signature::BBSplusSignature};

/// A signature under scheme `S`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Signature<S: Scheme> {
    BBSplus(BBSplusSignature),
    #[serde(skip)]
    _Unreachable(Infallible, PhantomData<S>),
}

/// A zero-knowledge proof of knowledge of a signature under scheme `S`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PoKSignature<S: Scheme> {
    BBSplus(BBSplusPoKSignature),
    #[serde(skip)]
    _Unreachable(Infallible, PhantomData<S>),
}
