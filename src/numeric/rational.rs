// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use rug::Rational;
use serde::{Deserialize, Serialize};

use crate::numeric::scalar::Scalar;

/// Arbitrary precision rational used by every exact predicate.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExactRational(pub Rational);

impl From<Rational> for ExactRational {
    fn from(value: Rational) -> Self {
        ExactRational(value)
    }
}

impl From<i32> for ExactRational {
    fn from(value: i32) -> Self {
        ExactRational(Rational::from(value))
    }
}

impl fmt::Display for ExactRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------- Owned arithmetic ----------

impl Add for ExactRational {
    type Output = ExactRational;

    fn add(mut self, rhs: ExactRational) -> ExactRational {
        self.0 += rhs.0;
        self
    }
}

impl Sub for ExactRational {
    type Output = ExactRational;

    fn sub(mut self, rhs: ExactRational) -> ExactRational {
        self.0 -= rhs.0;
        self
    }
}

impl Mul for ExactRational {
    type Output = ExactRational;

    fn mul(mut self, rhs: ExactRational) -> ExactRational {
        self.0 *= rhs.0;
        self
    }
}

impl Neg for ExactRational {
    type Output = ExactRational;

    fn neg(self) -> ExactRational {
        ExactRational(-self.0)
    }
}

// ---------- By-reference arithmetic ----------

impl<'a, 'b> Add<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result += &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Sub<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Mul<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        ExactRational(result)
    }
}

// ---------- Identities ----------

impl Zero for ExactRational {
    fn zero() -> Self {
        ExactRational(Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == std::cmp::Ordering::Equal
    }
}

impl One for ExactRational {
    fn one() -> Self {
        ExactRational(Rational::from(1))
    }
}

impl Scalar for ExactRational {
    fn from_f64_exact(value: f64) -> Self {
        match Rational::from_f64(value) {
            Some(rational) => ExactRational(rational),
            None => panic!("coordinate {value} is not finite"),
        }
    }

    fn sign(&self) -> std::cmp::Ordering {
        self.0.cmp0()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_binary_fractions_without_rounding() {
        let tenth = ExactRational::from_f64_exact(0.1);
        // 0.1 is not representable, the rational carries the binary value.
        assert_ne!(tenth.0, Rational::from((1, 10)));
        assert_eq!(ExactRational::from_f64_exact(0.5).0, Rational::from((1, 2)));
    }

    #[test]
    fn signs_follow_value() {
        assert_eq!(ExactRational::from(-3).sign(), std::cmp::Ordering::Less);
        assert!(ExactRational::zero().is_zero());
        let sum = &ExactRational::from(2) + &ExactRational::from(-2);
        assert_eq!(sum.sign(), std::cmp::Ordering::Equal);
    }
}
