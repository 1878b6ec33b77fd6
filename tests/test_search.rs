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
use std::collections::HashSet;

use navmesh2d::geometry::{Edge, Point};
use navmesh2d::kernel::orientation;
use navmesh2d::path::{PolypointState, SearchState, Successor, astar, find_corridor};
use navmesh2d::{NavmeshConfig, TriangleGraph, find_path};

/// Cell on a 4-connected grid with blocked cells.
#[derive(Clone, Debug, PartialEq)]
struct Cell {
    x: i32,
    y: i32,
}

struct Grid {
    width: i32,
    height: i32,
    blocked: HashSet<(i32, i32)>,
}

impl SearchState for Cell {
    type Key = (i32, i32);
    type Context = Grid;

    fn key(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn heuristic(&self, goal: &Self) -> f64 {
        ((self.x - goal.x).abs() + (self.y - goal.y).abs()) as f64
    }

    fn neighbors(&self, g: f64, grid: &Grid) -> Vec<Successor<Self>> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| Cell {
                x: self.x + dx,
                y: self.y + dy,
            })
            .filter(|c| c.x >= 0 && c.y >= 0 && c.x < grid.width && c.y < grid.height)
            .filter(|c| !grid.blocked.contains(&(c.x, c.y)))
            .map(|state| Successor { state, g: g + 1.0 })
            .collect()
    }
}

fn cell(x: i32, y: i32) -> Cell {
    Cell { x, y }
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn walled_square() -> (TriangleGraph, Vec<Edge>) {
    let corners = [p(100.0, 100.0), p(200.0, 100.0), p(200.0, 200.0), p(100.0, 200.0)];
    let walls: Vec<Edge> = (0..4).map(|i| Edge::new(corners[i], corners[(i + 1) % 4])).collect();
    let mesh = TriangleGraph::build(NavmeshConfig::default().with_shuffle_seed(8), &[], &walls);
    (mesh, walls)
}

fn properly_crosses(a: &Point, b: &Point, wall: &Edge) -> bool {
    let opposite = |x: Ordering, y: Ordering| x != Ordering::Equal && y == x.reverse();
    opposite(orientation(a, b, &wall.p1), orientation(a, b, &wall.p2))
        && opposite(orientation(&wall.p1, &wall.p2, a), orientation(&wall.p1, &wall.p2, b))
}

#[test]
fn test_astar_straight_line() {
    let grid = Grid {
        width: 10,
        height: 10,
        blocked: HashSet::new(),
    };
    let path = astar(cell(0, 0), &cell(5, 0), &grid).expect("reachable");
    assert_eq!(path.len(), 6);
    assert_eq!(path.first(), Some(&cell(0, 0)));
    assert_eq!(path.last(), Some(&cell(5, 0)));
}

#[test]
fn test_astar_detours_around_wall() {
    // Vertical wall at x = 3 with a gap at y = 9.
    let blocked: HashSet<(i32, i32)> = (0..9).map(|y| (3, y)).collect();
    let grid = Grid {
        width: 10,
        height: 10,
        blocked,
    };
    let path = astar(cell(0, 0), &cell(6, 0), &grid).expect("reachable");

    // 6 across, 9 up and 9 back down.
    assert_eq!(path.len(), 6 + 9 + 9 + 1);
    assert!(path.iter().all(|c| !grid.blocked.contains(&c.key())));
    for pair in path.windows(2) {
        assert_eq!(pair[0].heuristic(&pair[1]), 1.0);
    }
}

#[test]
fn test_astar_unreachable() {
    let blocked: HashSet<(i32, i32)> = (0..10).map(|y| (3, y)).collect();
    let grid = Grid {
        width: 10,
        height: 10,
        blocked,
    };
    assert!(astar(cell(0, 0), &cell(6, 0), &grid).is_none());
}

#[test]
fn test_astar_start_is_goal() {
    let grid = Grid {
        width: 2,
        height: 2,
        blocked: HashSet::new(),
    };
    assert_eq!(astar(cell(1, 1), &cell(1, 1), &grid), Some(vec![cell(1, 1)]));
}

#[test]
fn test_polypoint_search_follows_dual_graph() {
    let (mesh, _) = walled_square();
    let from = mesh.polypoint_at(&p(50.0, 150.0)).expect("on the mesh");
    let to = mesh.polypoint_at(&p(250.0, 150.0)).expect("on the mesh");

    let states = astar(
        PolypointState::new(from.clone()),
        &PolypointState::new(to.clone()),
        mesh.polypoints(),
    )
    .expect("connected around the walls");
    assert_eq!(states.first().map(|s| &s.polypoint), Some(&from));
    assert_eq!(states.last().map(|s| &s.polypoint), Some(&to));
    for pair in states.windows(2) {
        assert!(mesh.polypoints().is_connected(&pair[0].polypoint, &pair[1].polypoint));
    }
}

#[test]
fn test_corridor_faces_are_adjacent() {
    let (mesh, _) = walled_square();
    let corridor = find_corridor(&mesh, &p(50.0, 150.0), &p(250.0, 150.0)).expect("corridor");
    assert!(corridor[0].contains_point(&p(50.0, 150.0)));
    assert!(corridor[corridor.len() - 1].contains_point(&p(250.0, 150.0)));
    for pair in corridor.windows(2) {
        let side = pair[0].shared_edge(&pair[1]).expect("adjacent faces");
        assert!(!mesh.is_edge_fixed(&side));
    }
}

#[test]
fn test_find_path_goes_around_walls() {
    let (mesh, walls) = walled_square();
    let start = p(50.0, 150.0);
    let end = p(250.0, 150.0);
    let path = find_path(&mesh, start, end).expect("path around the square");

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    assert!(path.len() >= 3, "a straight line would cross the walls: {path:?}");
    for pair in path.windows(2) {
        for wall in &walls {
            assert!(
                !properly_crosses(&pair[0], &pair[1], wall),
                "{:?} -> {:?} crosses {wall:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_find_path_into_enclosed_area() {
    let (mesh, _) = walled_square();
    assert!(find_path(&mesh, p(50.0, 150.0), p(150.0, 150.0)).is_none());
}

#[test]
fn test_find_path_off_mesh() {
    let (mesh, _) = walled_square();
    assert!(find_path(&mesh, p(50.0, 150.0), p(50_000.0, 0.0)).is_none());
}

#[test]
fn test_find_path_within_one_face() {
    let (mesh, _) = walled_square();
    let start = p(140.0, 110.0);
    let end = p(190.0, 105.0);
    // Both points sit in the face below the square's diagonal.
    let path = find_path(&mesh, start, end).expect("same face");
    assert_eq!(path, vec![start, end]);
}

/// Two walls meeting at a convex corner, with a fan of four faces around it.
fn corner_mesh() -> (TriangleGraph, Point) {
    let corner = p(0.0, 200.0);
    let walls = [
        Edge::new(corner, p(-100.0, 200.0)),
        Edge::new(corner, p(0.0, 100.0)),
    ];
    let mesh = TriangleGraph::build(
        NavmeshConfig::default().with_shuffle_seed(1),
        &[p(0.0, 300.0), p(100.0, 200.0)],
        &walls,
    );
    (mesh, corner)
}

#[test]
fn test_find_path_bends_around_corner_clearance() {
    let (mesh, corner) = corner_mesh();
    let start = p(-10.0, 210.0);
    let end = p(10.0, 150.0);

    let path = find_path(&mesh, start, end).expect("path around the corner");
    assert_eq!(path, vec![start, mesh.clearance_point(&corner), end]);
}

#[test]
fn test_find_path_from_inside_corner_clearance() {
    let (mesh, corner) = corner_mesh();
    let zone_corner = mesh.clearance_point(&corner);
    let start = p(10.0, 205.0);
    let end = p(10.0, 150.0);
    assert!(zone_corner.x > start.x && zone_corner.y > start.y);

    let corridor = find_corridor(&mesh, &start, &end).expect("corridor");
    assert_eq!(corridor.len(), 2);

    // The only portal is behind the start, so the path runs straight down.
    let path = find_path(&mesh, start, end).expect("path past the corner");
    assert_eq!(path, vec![start, end]);
}
