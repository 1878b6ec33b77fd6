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

use std::array;
use std::ops::{Index, IndexMut};

use crate::numeric::scalar::Scalar;

/// Generic row-major matrix R x C
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Scalar, const R: usize, const C: usize>(pub [[T; C]; R]);

// ---------- Basics ----------
impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Build from rows.
    #[inline]
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Matrix(rows)
    }

    /// Transpose into C x R.
    #[inline]
    pub fn transpose(&self) -> Matrix<T, C, R> {
        Matrix(array::from_fn(|j| array::from_fn(|i| self[i][j].clone())))
    }

    /// Swap two rows in place.
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    fn rows_as_vecs(&self) -> Vec<Vec<T>> {
        self.0.iter().map(|row| row.to_vec()).collect()
    }
}

// ---------- Determinant ----------
impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Exact when `T` is exact: plain cofactor expansion, no pivoting.
    pub fn determinant(&self) -> T {
        determinant(&self.rows_as_vecs())
    }
}

/// Recursive cofactor expansion along the first row.
///
/// Meant for the 3x3 and 4x4 systems of the predicates. Every product is
/// formed in `T`, so with an exact scalar the sign of the result is exact.
pub fn determinant<T: Scalar>(rows: &[Vec<T>]) -> T {
    let n = rows.len();
    assert!(
        rows.iter().all(|row| row.len() == n),
        "determinant needs a square matrix"
    );

    match n {
        0 => T::one(),
        1 => rows[0][0].clone(),
        2 => {
            rows[0][0].clone() * rows[1][1].clone() - rows[0][1].clone() * rows[1][0].clone()
        }
        _ => {
            let mut acc = T::zero();
            for col in 0..n {
                if rows[0][col].sign().is_eq() {
                    continue;
                }
                let term = rows[0][col].clone() * determinant(&minor(rows, 0, col));
                acc = if col % 2 == 0 { acc + term } else { acc - term };
            }
            acc
        }
    }
}

fn minor<T: Scalar>(rows: &[Vec<T>], skip_row: usize, skip_col: usize) -> Vec<Vec<T>> {
    rows.iter()
        .enumerate()
        .filter(|(r, _)| *r != skip_row)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|(c, _)| *c != skip_col)
                .map(|(_, v)| v.clone())
                .collect()
        })
        .collect()
}

// ---------- Indexing ----------
impl<T: Scalar, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = [T; C];

    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<T: Scalar, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}
