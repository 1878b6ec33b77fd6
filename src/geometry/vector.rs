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

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;

/// Free 2D vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// Vector pointing from `from` to `to`.
    #[inline]
    pub fn from_points(from: &Point, to: &Point) -> Self {
        *to - *from
    }

    /// Unit vector at `angle` radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Vector::new(angle.cos(), angle.sin())
    }

    /// Angle against the positive x axis, in `(-π, π]`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }

    /// Same direction, unit length. Panics on the zero vector.
    pub fn normalized(&self) -> Vector {
        let magnitude = self.magnitude();
        assert!(magnitude > 0.0, "cannot normalize a zero-length vector");
        self.scale(1.0 / magnitude)
    }

    /// Shrinks the vector to `max` if it is longer, otherwise returns it as is.
    pub fn scale_to_max(&self, max: f64) -> Vector {
        let magnitude = self.magnitude();
        if magnitude > max {
            self.scale(max / magnitude)
        } else {
            *self
        }
    }

    /// Counter-clockwise perpendicular.
    #[inline]
    pub fn perpendicular(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Point at distance `length` from `origin` in this direction.
    pub fn extend_point(&self, origin: &Point, length: f64) -> Point {
        origin.translated(&self.normalized().scale(length))
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}
