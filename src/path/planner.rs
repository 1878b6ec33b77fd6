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

use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;
use crate::mesh::TriangleGraph;
use crate::path::funnel::{Portal, funnel};
use crate::path::portals::{portals_behind, portals_between, portals_for_path};
use crate::path::search::{PolypointState, astar};

/// Faces a path from `start` to `end` walks through, found by searching
/// the polypoint graph. `None` when either point is off the mesh or the two
/// are not connected.
pub fn find_corridor(mesh: &TriangleGraph, start: &Point, end: &Point) -> Option<Vec<Triangle>> {
    let Some(from) = mesh.polypoint_at(start) else {
        tracing::warn!(point = %start, "path start is not on the navmesh");
        return None;
    };
    let Some(to) = mesh.polypoint_at(end) else {
        tracing::warn!(point = %end, "path end is not on the navmesh");
        return None;
    };

    let states = astar(
        PolypointState::new(from),
        &PolypointState::new(to),
        mesh.polypoints(),
    )?;
    Some(states.into_iter().map(|s| s.polypoint.triangle).collect())
}

/// Clearance-adjusted portals between `start` and `end`.
pub fn find_portals(mesh: &TriangleGraph, start: &Point, end: &Point) -> Option<Vec<Portal>> {
    find_corridor(mesh, start, end).map(|corridor| portals_for_path(mesh, &corridor))
}

/// Smoothed path from `start` to `end`, both included.
/// Smoothed path from `start` to `end`, or `None` when either point is off
/// the mesh or walls separate them. Portals the start is already past are
/// left out of the funnel.
pub fn find_path(mesh: &TriangleGraph, start: Point, end: Point) -> Option<Vec<Point>> {
    let corridor = find_corridor(mesh, &start, &end)?;
    let raw = portals_between(&corridor);
    let cleared = portals_for_path(mesh, &corridor);
    let skip = portals_behind(&start, &corridor, &raw, &cleared);
    Some(funnel(start, &cleared[skip..], end))
}
