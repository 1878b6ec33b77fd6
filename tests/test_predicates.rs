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

use navmesh2d::geometry::{Edge, Matrix, Point, determinant};
use navmesh2d::kernel::{
    are_collinear, in_circle, orientation, points_on_same_side, sort_counter_clockwise,
};
use navmesh2d::numeric::{ExactRational, Scalar};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_orientation() {
    let a = p(0.0, 0.0);
    let b = p(10.0, 0.0);
    assert_eq!(orientation(&a, &b, &p(5.0, 1.0)), Ordering::Greater);
    assert_eq!(orientation(&a, &b, &p(5.0, -1.0)), Ordering::Less);
    assert_eq!(orientation(&a, &b, &p(20.0, 0.0)), Ordering::Equal);
}

#[test]
fn test_orientation_is_exact_for_nearly_collinear_points() {
    let a = p(0.1, 0.1);
    let b = p(0.2, 0.2);
    let c = p(0.30000000000000004, 0.3);
    assert_ne!(orientation(&a, &b, &c), Ordering::Equal);
    assert!(are_collinear(&p(0.0, 0.0), &p(1.0, 1.0), &p(1e15, 1e15)));
}

#[test]
fn test_in_circle() {
    let a = p(0.0, 0.0);
    let b = p(10.0, 0.0);
    let c = p(10.0, 10.0);
    assert_eq!(in_circle(&a, &b, &c, &p(5.0, 5.0)), Ordering::Greater);
    assert_eq!(in_circle(&a, &b, &c, &p(0.0, 10.0)), Ordering::Equal);
    assert_eq!(in_circle(&a, &b, &c, &p(-1.0, 11.0)), Ordering::Less);
    assert_eq!(in_circle(&c, &b, &a, &p(5.0, 5.0)), Ordering::Greater);
}

#[test]
#[should_panic]
fn test_in_circle_rejects_collinear_triangle() {
    in_circle(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0), &p(0.0, 1.0));
}

#[test]
fn test_determinant_values() {
    let m = Matrix::from_rows([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 4.0]]);
    assert_eq!(m.determinant(), 18.0);

    let identity = Matrix::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    assert_eq!(identity.determinant(), 1.0);
}

#[test]
fn test_determinant_antisymmetry() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let rows: Vec<Vec<ExactRational>> = (0..4)
            .map(|_| {
                (0..4)
                    .map(|_| ExactRational::from(rng.random_range(-20..20)))
                    .collect()
            })
            .collect();
        let base = determinant(&rows);

        for (i, j) in [(0, 1), (0, 3), (1, 2), (2, 3)] {
            let mut swapped = rows.clone();
            swapped.swap(i, j);
            let flipped = determinant(&swapped);
            assert_eq!(flipped.sign(), base.sign().reverse());
            assert_eq!(flipped, -base.clone());
        }
    }
}

#[test]
fn test_matrix_row_swap_negates() {
    let mut m = Matrix::from_rows([[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [1.0, 0.0, 6.0]]);
    let before = m.determinant();
    m.swap_rows(0, 2);
    assert_eq!(m.determinant(), -before);
    assert_eq!(m.transpose().determinant(), -before);
}

#[test]
fn test_points_on_same_side() {
    let e = Edge::new(p(0.0, 0.0), p(10.0, 0.0));
    assert!(points_on_same_side(&p(1.0, 1.0), &p(8.0, 3.0), &e));
    assert!(!points_on_same_side(&p(1.0, 1.0), &p(8.0, -3.0), &e));
    assert!(!points_on_same_side(&p(1.0, 0.0), &p(8.0, 3.0), &e));
}

#[test]
fn test_sort_counter_clockwise() {
    let center = p(0.0, 0.0);
    let mut points = vec![p(0.0, -1.0), p(-1.0, 0.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 2.0)];
    sort_counter_clockwise(&center, &mut points);
    assert_eq!(
        points,
        vec![p(1.0, 0.0), p(1.0, 1.0), p(0.0, 2.0), p(-1.0, 0.0), p(0.0, -1.0)]
    );
}
