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

use crate::geometry::edge::Edge;
use crate::geometry::matrix::Matrix;
use crate::geometry::point::{Point, Vertex};
use crate::numeric::{ExactRational, Scalar};

#[inline]
fn exact(v: f64) -> ExactRational {
    ExactRational::from_f64_exact(v)
}

/// Sign of the homogeneous 3x3 determinant of `a`, `b`, `c`.
///
/// - `Greater` if `c` is left of the directed line `a -> b` (counter-clockwise)
/// - `Less` if it is to the right (clockwise)
/// - `Equal` if the three points are collinear
pub fn orientation(a: &Point, b: &Point, c: &Point) -> Ordering {
    let one = || ExactRational::from(1);
    let m = Matrix::from_rows([
        [exact(a.x), exact(a.y), one()],
        [exact(b.x), exact(b.y), one()],
        [exact(c.x), exact(c.y), one()],
    ]);
    m.determinant().sign()
}

/// Whether `d` lies inside the circumcircle of `a`, `b`, `c`.
///
/// `Greater` means strictly inside, `Equal` on the circle, `Less` outside.
/// The answer does not depend on the winding of `a`, `b`, `c`, which must not
/// be collinear.
pub fn in_circle(a: &Point, b: &Point, c: &Point, d: &Point) -> Ordering {
    let winding = orientation(a, b, c);
    assert!(
        !winding.is_eq(),
        "in_circle needs a proper triangle, {a}, {b}, {c} are collinear"
    );

    let row = |p: &Point| {
        let (x, y) = (exact(p.x), exact(p.y));
        let lifted = &(&x * &x) + &(&y * &y);
        [x, y, lifted, ExactRational::from(1)]
    };
    let m = Matrix::from_rows([row(a), row(b), row(c), row(d)]);
    let sign = m.determinant().sign();

    if winding == Ordering::Greater {
        sign
    } else {
        sign.reverse()
    }
}

#[inline]
pub fn are_collinear(a: &Point, b: &Point, c: &Point) -> bool {
    orientation(a, b, c).is_eq()
}

/// `p` and `q` are strictly on the same side of the line through `edge`.
pub fn points_on_same_side<V: Vertex>(p: &Point, q: &Point, edge: &Edge<V>) -> bool {
    let (a, b) = (edge.start(), edge.end());
    let sp = orientation(&a, &b, p);
    let sq = orientation(&a, &b, q);
    !sp.is_eq() && sp == sq
}

/// Upper half plane (including the positive x axis) sorts before the lower.
fn half_plane(center: &Point, p: &Point) -> u8 {
    if p.y > center.y || (p.y == center.y && p.x > center.x) {
        0
    } else {
        1
    }
}

/// Sorts `points` by angle around `center`, counter-clockwise, starting
/// from the positive x direction. Uses exact orientation rather than
/// `atan2`, so points on nearly identical rays keep a stable order.
pub fn sort_counter_clockwise(center: &Point, points: &mut [Point]) {
    points.sort_by(|p, q| {
        half_plane(center, p)
            .cmp(&half_plane(center, q))
            .then_with(|| orientation(center, q, p))
            .then_with(|| center.distance_squared(p).total_cmp(&center.distance_squared(q)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_circle_ignores_winding() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(0.0, 10.0);
        let inside = Point::new(3.0, 3.0);
        assert_eq!(in_circle(&a, &b, &c, &inside), Ordering::Greater);
        assert_eq!(in_circle(&a, &c, &b, &inside), Ordering::Greater);
        assert_eq!(in_circle(&a, &b, &c, &Point::new(10.0, 10.0)), Ordering::Equal);
        assert_eq!(in_circle(&a, &b, &c, &Point::new(20.0, 20.0)), Ordering::Less);
    }
}
