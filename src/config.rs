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

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;

/// Tunables for building and querying a navmesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavmeshConfig {
    /// How far clearance points sit from a convex wall corner.
    #[serde(default = "default_clearance")]
    pub clearance: f64,

    /// Triangle the mesh starts from. Every vertex inserted later must lie
    /// inside it.
    #[serde(default = "default_super_triangle")]
    pub super_triangle: [Point; 3],

    /// Seed for the insertion order shuffle of bulk builds. `None` draws
    /// from the thread rng.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_clearance() -> f64 {
    27.0
}

fn default_super_triangle() -> [Point; 3] {
    [
        Point::new(-9999.0, -100.0),
        Point::new(9999.0, -100.0),
        Point::new(0.0, 9999.0),
    ]
}

impl Default for NavmeshConfig {
    fn default() -> Self {
        NavmeshConfig {
            clearance: default_clearance(),
            super_triangle: default_super_triangle(),
            shuffle_seed: None,
        }
    }
}

impl NavmeshConfig {
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_super_triangle(mut self, a: Point, b: Point, c: Point) -> Self {
        self.super_triangle = [a, b, c];
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }
}
