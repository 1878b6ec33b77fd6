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

use serde::{Deserialize, Serialize};

use crate::geometry::edge::Edge;
use crate::geometry::point::{Point, Vertex};
use crate::kernel::predicates::orientation;

/// Unordered triangle. Points are stored sorted, so equality and hashing are
/// set semantics over the three corners.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triangle {
    points: [Point; 3],
}

/// Rounded centroid of a triangle, tagged with the triangle it belongs to.
///
/// Two neighbouring triangles can round to the same center; the back
/// reference keeps their polypoints distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Polypoint {
    pub point: Point,
    pub triangle: Triangle,
}

impl Vertex for Polypoint {
    #[inline]
    fn position(&self) -> Point {
        self.point
    }
}

impl Triangle {
    /// Panics when the three points are collinear.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        assert!(
            !orientation(&a, &b, &c).is_eq(),
            "triangle {a}, {b}, {c} has zero area"
        );
        Triangle::new_unchecked(a, b, c)
    }

    /// Skips the area check. Only for callers that handle degenerate
    /// triangles themselves.
    pub fn new_unchecked(a: Point, b: Point, c: Point) -> Self {
        let mut points = [a, b, c];
        points.sort();
        Triangle { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    /// Corners in counter-clockwise order.
    pub fn ccw_points(&self) -> [Point; 3] {
        let [a, b, c] = self.points;
        if orientation(&a, &b, &c) == Ordering::Less {
            [a, c, b]
        } else {
            [a, b, c]
        }
    }

    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.points;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(a, c)]
    }

    pub fn midpoints(&self) -> [Point; 3] {
        self.edges().map(|e| e.midpoint())
    }

    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.points;
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// The polypoint standing for this triangle in the dual graph.
    pub fn center(&self) -> Polypoint {
        Polypoint {
            point: self.centroid().rounded(),
            triangle: self.clone(),
        }
    }

    pub fn area(&self) -> f64 {
        let [a, b, c] = self.points;
        ((b - a).cross(&(c - a)) / 2.0).abs()
    }

    #[inline]
    pub fn has_point(&self, p: &Point) -> bool {
        self.points.contains(p)
    }

    #[inline]
    pub fn has_edge(&self, e: &Edge) -> bool {
        self.has_point(&e.p1) && self.has_point(&e.p2)
    }

    /// The side opposite `p`. Panics if `p` is not a corner.
    pub fn edge_without_point(&self, p: &Point) -> Edge {
        assert!(self.has_point(p), "{p} is not a corner of {self:?}");
        let mut rest = self.points.iter().filter(|q| *q != p);
        match (rest.next(), rest.next()) {
            (Some(a), Some(b)) => Edge::new(*a, *b),
            _ => unreachable!("a triangle has three distinct corners"),
        }
    }

    /// The corner opposite `e`. Panics if `e` is not a side.
    pub fn point_not_in_edge(&self, e: &Edge) -> Point {
        assert!(self.has_edge(e), "{e:?} is not a side of {self:?}");
        match self.points.iter().find(|p| !e.contains_point(p)) {
            Some(p) => *p,
            None => unreachable!("a triangle has three distinct corners"),
        }
    }

    pub fn shared_edge(&self, other: &Triangle) -> Option<Edge> {
        self.edges().into_iter().find(|e| other.has_edge(e))
    }

    /// Closed containment: points on the boundary count.
    pub fn contains_point(&self, p: &Point) -> bool {
        let [a, b, c] = self.ccw_points();
        orientation(&a, &b, p) != Ordering::Less
            && orientation(&b, &c, p) != Ordering::Less
            && orientation(&c, &a, p) != Ordering::Less
    }

    /// Closed test: the segment touches the triangle anywhere, boundary
    /// contact included.
    pub fn intersects_edge(&self, e: &Edge) -> bool {
        !self.separated_from(e, true)
    }

    /// Open test: the open segment passes through the triangle's interior.
    /// Running along a side or grazing a corner does not count.
    pub fn is_crossed_by(&self, e: &Edge) -> bool {
        !self.separated_from(e, false)
    }

    /// Separating axis test over the three sides and the segment's line.
    /// With `touching_counts` only strict separation splits the two shapes.
    fn separated_from(&self, e: &Edge, touching_counts: bool) -> bool {
        let [a, b, c] = self.ccw_points();
        let (s, t) = (e.start(), e.end());
        let beyond = |side: Ordering| {
            if touching_counts {
                side == Ordering::Less
            } else {
                side != Ordering::Greater
            }
        };

        for (u, v) in [(a, b), (b, c), (c, a)] {
            if beyond(orientation(&u, &v, &s)) && beyond(orientation(&u, &v, &t)) {
                return true;
            }
        }

        let sides = [a, b, c].map(|p| orientation(&s, &t, &p));
        if touching_counts {
            sides.iter().all(|side| side.is_gt()) || sides.iter().all(|side| side.is_lt())
        } else {
            sides.iter().all(|side| side.is_ge()) || sides.iter().all(|side| side.is_le())
        }
    }
}
