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

//! Operator impls shared by the prime field newtypes over `BigUint`.

/// Implements `Add`, `Sub`, `Mul` (for every owned/borrowed combination) and `Neg` for a
/// newtype `$t(BigUint)` whose value is kept reduced modulo `$modulus()`.
macro_rules! impl_modular_ops {
    ($t:ident, $modulus:path) => {
        impl<'a, 'b> core::ops::Add<&'b $t> for &'a $t {
            type Output = $t;

            fn add(self, rhs: &'b $t) -> $t {
                let sum = &self.0 + &rhs.0;
                if &sum >= $modulus() {
                    $t(sum - $modulus())
                } else {
                    $t(sum)
                }
            }
        }

        impl<'a, 'b> core::ops::Sub<&'b $t> for &'a $t {
            type Output = $t;

            fn sub(self, rhs: &'b $t) -> $t {
                if self.0 >= rhs.0 {
                    $t(&self.0 - &rhs.0)
                } else {
                    $t($modulus() - &rhs.0 + &self.0)
                }
            }
        }

        impl<'a, 'b> core::ops::Mul<&'b $t> for &'a $t {
            type Output = $t;

            fn mul(self, rhs: &'b $t) -> $t {
                $t((&self.0 * &rhs.0) % $modulus())
            }
        }

        impl<'a> core::ops::Neg for &'a $t {
            type Output = $t;

            fn neg(self) -> $t {
                if self.0.is_zero() {
                    $t(BigUint::zero())
                } else {
                    $t($modulus() - &self.0)
                }
            }
        }

        impl core::ops::Neg for $t {
            type Output = $t;

            fn neg(self) -> $t {
                -&self
            }
        }

        forward_binop!($t, Add, add);
        forward_binop!($t, Sub, sub);
        forward_binop!($t, Mul, mul);
    };
}

macro_rules! forward_binop {
    ($t:ident, $tr:ident, $f:ident) => {
        impl core::ops::$tr<$t> for $t {
            type Output = $t;

            fn $f(self, rhs: $t) -> $t {
                core::ops::$tr::$f(&self, &rhs)
            }
        }

        impl<'b> core::ops::$tr<&'b $t> for $t {
            type Output = $t;

            fn $f(self, rhs: &'b $t) -> $t {
                core::ops::$tr::$f(&self, rhs)
            }
        }

        impl<'a> core::ops::$tr<$t> for &'a $t {
            type Output = $t;

            fn $f(self, rhs: $t) -> $t {
                core::ops::$tr::$f(self, &rhs)
            }
        }
    };
}
