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

use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;
use crate::kernel::predicates::{are_collinear, orientation};
use crate::mesh::TriangleGraph;
use crate::path::funnel::Portal;

/// Shared sides of consecutive faces, each seen from the face being left:
/// `left` is counter-clockwise of `right` from that face's far corner.
///
/// Panics if two consecutive faces do not share a side.
pub fn portals_between(corridor: &[Triangle]) -> Vec<Portal> {
    corridor
        .windows(2)
        .map(|pair| {
            let Some(side) = pair[0].shared_edge(&pair[1]) else {
                panic!("{:?} and {:?} are not adjacent", pair[0], pair[1]);
            };
            let apex = pair[0].point_not_in_edge(&side);
            if orientation(&apex, &side.p2, &side.p1) == Ordering::Greater {
                Portal::new(side.p1, side.p2)
            } else {
                Portal::new(side.p2, side.p1)
            }
        })
        .collect()
}

/// [`portals_between`] with every endpoint pushed to its clearance point,
/// so the smoothed path keeps its distance from convex wall corners.
pub fn portals_for_path(mesh: &TriangleGraph, corridor: &[Triangle]) -> Vec<Portal> {
    portals_between(corridor)
        .into_iter()
        .map(|portal| {
            Portal::new(
                mesh.clearance_point(&portal.left),
                mesh.clearance_point(&portal.right),
            )
        })
        .collect()
}

/// Number of leading portals the agent at `start` has already passed.
///
/// Only a start inside the clearance zone of the first portal can be past
/// it: the quad between the portal's corners and their clearance points.
/// From there, portals are skipped while the face beyond them lies outside
/// the wedge `start` sees through the cleared portal.
pub fn portals_behind(
    start: &Point,
    corridor: &[Triangle],
    raw: &[Portal],
    cleared: &[Portal],
) -> usize {
    assert_eq!(raw.len(), cleared.len(), "raw and cleared portals differ in length");
    let (Some(first), Some(first_cleared)) = (raw.first(), cleared.first()) else {
        return 0;
    };
    assert_eq!(corridor.len(), raw.len() + 1, "corridor does not match its portals");
    if !in_clearance_zone(start, first, first_cleared) {
        return 0;
    }

    let mut skipped = 0;
    while let Some(gate) = cleared.get(skipped) {
        let ahead = corridor[skipped + 1].center().point;
        let outside = !same_side(start, &gate.left, &ahead, &gate.right)
            || !same_side(start, &gate.right, &ahead, &gate.left);
        if !outside {
            break;
        }
        skipped += 1;
    }
    if skipped > 0 {
        tracing::trace!(start = %start, skipped, "start is past the first portals");
    }
    skipped
}

fn in_clearance_zone(p: &Point, raw: &Portal, cleared: &Portal) -> bool {
    [
        [raw.left, cleared.right, cleared.left],
        [raw.left, cleared.right, raw.right],
    ]
    .iter()
    .any(|[a, b, c]| !are_collinear(a, b, c) && Triangle::new(*a, *b, *c).contains_point(p))
}

/// `p` and `q` lie strictly on one side of the line from `from` through `to`.
fn same_side(from: &Point, to: &Point, p: &Point, q: &Point) -> bool {
    let sp = orientation(from, to, p);
    !sp.is_eq() && sp == orientation(from, to, q)
}
