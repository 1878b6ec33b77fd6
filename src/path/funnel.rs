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

//! String pulling through a corridor of portals.
//!
//! The funnel keeps an apex and two legs. Each portal either narrows a leg
//! or, when its endpoint passes over the opposite leg, forces a bend at that
//! leg's end: the bend becomes a waypoint and the new apex, and the scan
//! restarts from the portal that defined it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::kernel::predicates::orientation;

/// Segment the path must cross between two consecutive faces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub left: Point,
    pub right: Point,
}

impl Portal {
    #[inline]
    pub fn new(left: Point, right: Point) -> Self {
        Portal { left, right }
    }

    /// Zero-width portal at `p`.
    #[inline]
    pub fn point(p: Point) -> Self {
        Portal { left: p, right: p }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.left.midpoint(&self.right)
    }

    /// Same portal with `left` counter-clockwise of `right` when seen from
    /// `viewer`. Degenerate portals and collinear viewers are left alone.
    pub fn oriented_from(&self, viewer: &Point) -> Portal {
        if orientation(viewer, &self.right, &self.left) == Ordering::Less {
            Portal::new(self.right, self.left)
        } else {
            *self
        }
    }
}

/// Taut path from `start` to `end` through `portals`.
///
/// Portals may be given in either handedness; each is oriented against the
/// previous one before the scan. The result starts at `start`, ends at `end`
/// and bends only at portal endpoints.
pub fn funnel(start: Point, portals: &[Portal], end: Point) -> Vec<Point> {
    let mut gates = Vec::with_capacity(portals.len() + 2);
    gates.push(Portal::point(start));
    let mut viewer = start;
    for portal in portals {
        gates.push(portal.oriented_from(&viewer));
        viewer = portal.midpoint();
    }
    gates.push(Portal::point(end));

    let mut path = vec![start];
    let (mut apex, mut left, mut right) = (start, start, start);
    let (mut left_index, mut right_index) = (0, 0);

    let mut i = 1;
    while i < gates.len() {
        let gate = gates[i];

        if orientation(&apex, &right, &gate.right) != Ordering::Less {
            if apex == right || orientation(&apex, &left, &gate.right) == Ordering::Less {
                right = gate.right;
                right_index = i;
            } else {
                apex = left;
                push_waypoint(&mut path, apex);
                right = apex;
                right_index = left_index;
                i = left_index + 1;
                continue;
            }
        }

        if orientation(&apex, &left, &gate.left) != Ordering::Greater {
            if apex == left || orientation(&apex, &right, &gate.left) == Ordering::Greater {
                left = gate.left;
                left_index = i;
            } else {
                apex = right;
                push_waypoint(&mut path, apex);
                left = apex;
                left_index = right_index;
                i = right_index + 1;
                continue;
            }
        }

        i += 1;
    }

    push_waypoint(&mut path, end);
    path
}

fn push_waypoint(path: &mut Vec<Point>, p: Point) {
    if path.last() != Some(&p) {
        path.push(p);
    }
}
