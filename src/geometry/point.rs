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

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::vector::Vector;

/// Anything that can sit in a [`Graph`](crate::graph::Graph).
///
/// Identity comes from `Eq`/`Hash`; geometry comes from [`Vertex::position`].
/// Two vertices may share a position while staying distinct.
pub trait Vertex: Clone + Eq + Hash + Ord + fmt::Debug {
    fn position(&self) -> Point;
}

/// Planar point with exact coordinate identity.
///
/// Equality, hashing and ordering all use the raw coordinates with no
/// tolerance. Negative zero is folded into positive zero so the three agree.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        assert!(
            x.is_finite() && y.is_finite(),
            "point coordinates must be finite, got ({x}, {y})"
        );
        Point { x: x + 0.0, y: y + 0.0 }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (*other - *self).magnitude()
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let d = *other - *self;
        d.x * d.x + d.y * d.y
    }

    /// Both coordinates rounded to the nearest integer.
    #[inline]
    pub fn rounded(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point reached by moving `vector` from here.
    #[inline]
    pub fn translated(&self, vector: &Vector) -> Point {
        Point::new(self.x + vector.x, self.y + vector.y)
    }
}

impl Vertex for Point {
    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

fn compare_coordinate(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| panic!("cannot order NaN coordinates {a} and {b}"))
}

// ---------- Identity ----------

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

/// Lexicographic: x first, then y.
impl Ord for Point {
    fn cmp(&self, other: &Point) -> Ordering {
        compare_coordinate(self.x, other.x).then_with(|| compare_coordinate(self.y, other.y))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------- Arithmetic ----------

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        self.translated(&rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(p: &Point) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn negative_zero_is_the_same_point() {
        let a = Point { x: -0.0, y: 1.0 };
        let b = Point::new(0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn orders_by_x_then_y() {
        let mut points = vec![Point::new(1.0, 0.0), Point::new(0.0, 5.0), Point::new(0.0, -1.0)];
        points.sort();
        assert_eq!(
            points,
            vec![Point::new(0.0, -1.0), Point::new(0.0, 5.0), Point::new(1.0, 0.0)]
        );
    }
}
