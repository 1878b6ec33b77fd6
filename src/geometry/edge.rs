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

use rug::Rational;
use serde::{Deserialize, Serialize};

use crate::geometry::point::{Point, Vertex};
use crate::geometry::vector::Vector;
use crate::kernel::predicates::orientation;
use crate::numeric::ExactRational;

/// Exact direction of a line. Vertical lines have no finite slope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slope {
    Finite(ExactRational),
    Vertical,
}

/// Exact identity of the infinite line through an edge.
///
/// For finite slopes the intercept is the y-intercept; for vertical lines it
/// is the x coordinate of the line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub slope: Slope,
    pub intercept: ExactRational,
}

/// Undirected edge with canonical endpoint order (`p1 < p2`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge<V = Point> {
    pub p1: V,
    pub p2: V,
}

fn exact(value: f64) -> Rational {
    match Rational::from_f64(value) {
        Some(rational) => rational,
        None => panic!("coordinate {value} is not finite"),
    }
}

impl<V: Vertex> Edge<V> {
    /// Panics when both endpoints are the same vertex.
    pub fn new(a: V, b: V) -> Self {
        assert!(a != b, "edge endpoints must differ, got {a:?} twice");
        if a < b {
            Edge { p1: a, p2: b }
        } else {
            Edge { p1: b, p2: a }
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.p1.position()
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.p2.position()
    }

    #[inline]
    pub fn contains_point(&self, p: &V) -> bool {
        self.p1 == *p || self.p2 == *p
    }

    /// Opposite endpoint. Panics if `p` is not an endpoint.
    pub fn other(&self, p: &V) -> &V {
        if self.p1 == *p {
            &self.p2
        } else if self.p2 == *p {
            &self.p1
        } else {
            panic!("{p:?} is not an endpoint of {self:?}")
        }
    }

    pub fn shares_point(&self, other: &Edge<V>) -> bool {
        self.contains_point(&other.p1) || self.contains_point(&other.p2)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(&self.end())
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start().midpoint(&self.end())
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.end() - self.start()
    }

    pub fn slope(&self) -> Slope {
        let (a, b) = (self.start(), self.end());
        let dx = exact(b.x) - exact(a.x);
        if dx.cmp0() == Ordering::Equal {
            return Slope::Vertical;
        }
        let dy = exact(b.y) - exact(a.y);
        Slope::Finite(ExactRational(dy / dx))
    }

    pub fn intercept(&self) -> ExactRational {
        let a = self.start();
        match self.slope() {
            Slope::Vertical => ExactRational(exact(a.x)),
            Slope::Finite(m) => ExactRational(exact(a.y) - m.0 * exact(a.x)),
        }
    }

    pub fn line_key(&self) -> LineKey {
        LineKey {
            intercept: self.intercept(),
            slope: self.slope(),
        }
    }

    /// Parameter of the orthogonal projection of `p` on the supporting line,
    /// 0 at `p1` and 1 at `p2`.
    fn projection_parameter(&self, p: &Point) -> f64 {
        let d = self.direction();
        let len2 = d.dot(&d);
        if len2 == 0.0 {
            return 0.0;
        }
        (*p - self.start()).dot(&d) / len2
    }

    /// Whether the projection of `p` on the line falls inside the segment.
    pub fn lays_on_edge(&self, p: &Point) -> bool {
        let t = self.projection_parameter(p);
        (0.0..=1.0).contains(&t)
    }

    pub fn projected_point(&self, p: &Point) -> Point {
        let t = self.projection_parameter(p);
        self.start().translated(&self.direction().scale(t))
    }

    /// Distance to the segment: perpendicular when the projection lands on
    /// it, otherwise the nearest endpoint.
    pub fn dist_to_point(&self, p: &Point) -> f64 {
        if self.lays_on_edge(p) {
            self.projected_point(p).distance(p)
        } else {
            self.start().distance(p).min(self.end().distance(p))
        }
    }

    pub fn is_collinear_with_point(&self, p: &Point) -> bool {
        orientation(&self.start(), &self.end(), p).is_eq()
    }

    pub fn is_collinear_with_edge(&self, other: &Edge<V>) -> bool {
        self.is_collinear_with_point(&other.start()) && self.is_collinear_with_point(&other.end())
    }

    /// Collinear and sharing a stretch of positive length.
    pub fn overlaps_edge(&self, other: &Edge<V>) -> bool {
        if !self.is_collinear_with_edge(other) {
            return false;
        }
        // Along a line the lexicographic order is the order of travel.
        let lo = self.start().max(other.start());
        let hi = self.end().min(other.end());
        lo < hi
    }

    /// `p` lies on the segment; `strict` excludes the endpoints.
    pub fn is_between_points(&self, p: &Point, strict: bool) -> bool {
        let (a, b) = (self.start(), self.end());
        if !orientation(&a, &b, p).is_eq() {
            return false;
        }
        let within = a.x.min(b.x) <= p.x
            && p.x <= a.x.max(b.x)
            && a.y.min(b.y) <= p.y
            && p.y <= a.y.max(b.y);
        within && !(strict && (*p == a || *p == b))
    }
}

impl<V: Vertex + fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.p1, self.p2)
    }
}
