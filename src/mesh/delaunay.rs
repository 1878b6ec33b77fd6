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

//! Constrained Delaunay maintenance of a [`TriangleGraph`].
//!
//! Vertices go in by splitting the face(s) around them and flipping illegal
//! sides until every unconstrained side passes the in-circle test again.
//! Constraints cut through the faces they cross, and the two cavities on
//! either side are filled back in with their own Delaunay triangulation.

use std::cmp::Ordering;

use ahash::AHashMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::NavmeshConfig;
use crate::geometry::edge::Edge;
use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;
use crate::kernel::predicates::{in_circle, orientation};
use crate::mesh::location_tree::NodeId;
use crate::mesh::triangle_graph::{MeshState, TriangleGraph};

/// One environment change, applied as a single serialized mesh update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshUpdate {
    /// Walls that stop being walls. Applied first.
    pub unfix: Vec<Edge>,
    /// Vertices to take out. Their walls must be in `unfix` or already gone.
    pub remove: Vec<Point>,
    pub add: Vec<Point>,
    /// Walls to insert last, once every vertex is in place.
    pub fix: Vec<Edge>,
}

impl TriangleGraph {
    /// Builds a mesh over `vertices` and the wall edges in `walls`.
    ///
    /// Vertices and walls are inserted in shuffled order, which keeps the
    /// expected cost of point location low on grid-like inputs.
    pub fn build(config: NavmeshConfig, vertices: &[Point], walls: &[Edge]) -> Self {
        let mut rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut mesh = TriangleGraph::bootstrapped(config);

        let mut points: Vec<Point> = vertices
            .iter()
            .copied()
            .chain(walls.iter().flat_map(|e| [e.p1, e.p2]))
            .collect();
        points.sort();
        points.dedup();
        points.shuffle(&mut rng);
        for p in points {
            mesh.delaunay_add_vertex(p);
        }

        let mut walls = walls.to_vec();
        walls.shuffle(&mut rng);
        for wall in walls {
            mesh.delaunay_add_constraint_edge(wall);
        }

        mesh.state = MeshState::Triangulated;
        tracing::debug!(
            vertices = mesh.graph.num_vertices(),
            triangles = mesh.num_triangles(),
            walls = mesh.fixed_edges().len(),
            "built navmesh"
        );
        mesh
    }

    // ---------- Vertex insertion ----------

    /// Inserts `p` and restores the Delaunay property around it.
    ///
    /// `p` must lie inside the current mesh and must not be a vertex yet.
    /// A point landing on a wall splits the wall in two.
    pub fn delaunay_add_vertex(&mut self, p: Point) {
        assert!(
            self.state != MeshState::Empty,
            "bootstrap the navmesh before inserting vertices"
        );
        assert!(!self.graph.has_vertex(&p), "{p} is already a vertex");

        let split = self.tree_mut().split(p);
        if let Some(e) = &split.split_edge {
            if self.is_edge_fixed(e) {
                self.unfix(e);
                self.fix(&Edge::new(p, e.p1));
                self.fix(&Edge::new(p, e.p2));
            }
        }

        let retired: Vec<Triangle> = split
            .superseded
            .iter()
            .map(|id| self.tree().triangle(*id).clone())
            .collect();
        self.commit_faces(&retired, &split.created);

        let opposite: Vec<Edge> = split
            .created
            .iter()
            .map(|id| self.tree().triangle(*id).edge_without_point(&p))
            .collect();
        for e in opposite {
            self.legalize(&p, e);
        }

        self.state = MeshState::Triangulated;
        tracing::debug!(point = %p, "inserted vertex");
    }

    /// Flips `e` if the face across it has its apex inside the circumcircle
    /// of the face `(p, e)`, then checks the two sides that became opposite
    /// `p`. Walls are never flipped.
    fn legalize(&mut self, p: &Point, e: Edge) {
        if self.is_edge_fixed(&e) {
            return;
        }
        let tree = self.tree();
        let faces = tree.find_nodes_with_edge(&e);
        let Some(own) = faces.iter().copied().find(|id| tree.triangle(*id).has_point(p)) else {
            return;
        };
        let Some(across) = faces.iter().copied().find(|id| *id != own) else {
            return;
        };
        let apex = tree.triangle(across).point_not_in_edge(&e);

        if in_circle(p, &e.p1, &e.p2, &apex) != Ordering::Greater {
            return;
        }

        self.replace_faces(
            &[own, across],
            vec![Triangle::new(*p, apex, e.p1), Triangle::new(*p, apex, e.p2)],
        );
        tracing::trace!(from = ?e, to = ?Edge::new(*p, apex), "flipped edge");

        self.legalize(p, Edge::new(e.p1, apex));
        self.legalize(p, Edge::new(e.p2, apex));
    }

    // ---------- Constraints ----------

    /// Makes `e` a wall, cutting it into the mesh if it is not an edge yet.
    ///
    /// Both endpoints must be vertices. A constraint running through other
    /// vertices is split at them. Crossing an existing wall is a contract
    /// violation.
    pub fn delaunay_add_constraint_edge(&mut self, e: Edge) {
        assert!(
            self.graph.has_vertex(&e.p1) && self.graph.has_vertex(&e.p2),
            "constraint {e:?} needs both endpoints in the mesh"
        );

        if self.graph.has_edge(&e) {
            self.fix(&e);
            self.unlink_across(&e);
            self.state = MeshState::Triangulated;
            tracing::debug!(edge = ?e, "fixed existing edge");
            return;
        }

        let tree = self.tree();
        let mut stops: Vec<Point> = tree
            .find_nodes_touching_edge(&e)
            .into_iter()
            .flat_map(|id| *tree.triangle(id).points())
            .filter(|q| e.is_between_points(q, true))
            .collect();
        if !stops.is_empty() {
            // Along a line the lexicographic order is the order of travel.
            stops.sort();
            stops.dedup();
            stops.insert(0, e.p1);
            stops.push(e.p2);
            tracing::debug!(edge = ?e, pieces = stops.len() - 1, "splitting constraint at vertices");
            for pair in stops.windows(2) {
                self.delaunay_add_constraint_edge(Edge::new(pair[0], pair[1]));
            }
            return;
        }

        self.cut_constraint(e);
    }

    /// Inserts a constraint that crosses at least one face and has no vertex
    /// in its interior.
    fn cut_constraint(&mut self, e: Edge) {
        let tree = self.tree();
        let crossed: Vec<NodeId> = tree.find_nodes_crossing_edge(&e);
        assert!(!crossed.is_empty(), "constraint {e:?} crosses no triangle");
        let faces: Vec<Triangle> = crossed.iter().map(|id| tree.triangle(*id).clone()).collect();

        for face in &faces {
            for side in face.edges() {
                assert!(
                    !(self.is_edge_fixed(&side) && segments_cross(&side, &e)),
                    "constraint {e:?} crosses wall {side:?}"
                );
            }
        }

        let (upper, lower) = cavity_chains(&e, faces);
        let mut fill = triangulate_region(&upper);
        fill.extend(triangulate_region(&lower));

        self.fix(&e);
        self.replace_faces(&crossed, fill);
        self.state = MeshState::Triangulated;
        tracing::debug!(edge = ?e, crossed = crossed.len(), "inserted constraint");
    }

    /// Turns a wall back into an ordinary, flippable edge. The faces stay as
    /// they are; only the dual link across the edge comes back.
    pub fn unfix_edge(&mut self, e: &Edge) {
        assert!(self.graph.has_edge(e), "{e:?} is not an edge of the mesh");
        assert!(self.is_edge_fixed(e), "{e:?} is not fixed");
        self.unfix(e);
        self.link_across(e);
        tracing::debug!(edge = ?e, "unfixed edge");
    }

    // ---------- Removal ----------

    /// Takes `p` out of the mesh and re-triangulates the hole it leaves.
    ///
    /// `p` must be an interior vertex with no wall attached; unfix its walls
    /// first.
    pub fn delaunay_remove_vertex(&mut self, p: &Point) {
        assert!(self.graph.has_vertex(p), "{p} is not a vertex");
        assert!(
            self.fixed_neighbors(p).is_empty(),
            "{p} still has walls; unfix them before removing it"
        );

        let tree = self.tree();
        let star = tree.faces_around(p);
        let hole = star_polygon(p, star.iter().map(|id| tree.triangle(*id)));
        let fill = fill_star_hole(p, hole);

        self.replace_faces(&star, fill);
        self.graph.remove_vertex(p);
        self.fixed.remove(p);
        tracing::debug!(point = %p, faces = star.len(), "removed vertex");
    }

    /// Applies one environment change in a fixed order: unfix, remove, add,
    /// then fix.
    pub fn dynamic_update(&mut self, update: MeshUpdate) {
        for e in &update.unfix {
            if self.is_edge_fixed(e) {
                self.unfix_edge(e);
            }
        }
        for p in &update.remove {
            self.delaunay_remove_vertex(p);
        }
        for p in update.add {
            if !self.graph.has_vertex(&p) {
                self.delaunay_add_vertex(p);
            }
        }
        for e in update.fix {
            self.delaunay_add_constraint_edge(e);
        }
    }

    /// Removes the super-triangle corners and every face touching them,
    /// leaving only the triangulation of the inserted points.
    pub fn strip_super_triangle(&mut self) {
        let corners = self.config.super_triangle;
        let tree = self.tree();
        let doomed: Vec<NodeId> = tree
            .live_nodes()
            .into_iter()
            .filter(|id| corners.iter().any(|c| tree.triangle(*id).has_point(c)))
            .collect();
        let dropped: Vec<Triangle> = doomed.iter().map(|id| tree.triangle(*id).clone()).collect();

        self.tree_mut().retire(&doomed);
        for triangle in &dropped {
            self.polypoints.remove_vertex(&triangle.center());
        }
        for corner in &corners {
            self.graph.remove_vertex(corner);
            self.fixed.remove(corner);
        }
        for triangle in &dropped {
            for e in triangle.edges() {
                if self.graph.has_edge(&e) && self.triangles_with_edge(&e).is_empty() {
                    self.unfix(&e);
                    self.graph.remove_edge_and_vertices(&e);
                }
            }
        }
        tracing::debug!(faces = dropped.len(), "stripped super-triangle");
    }
}

/// Proper crossing: the segments meet at a single point interior to both.
fn segments_cross(a: &Edge, b: &Edge) -> bool {
    if a.shares_point(b) {
        return false;
    }
    let opposite = |x: Ordering, y: Ordering| x != Ordering::Equal && y == x.reverse();
    opposite(orientation(&a.p1, &a.p2, &b.p1), orientation(&a.p1, &a.p2, &b.p2))
        && opposite(orientation(&b.p1, &b.p2, &a.p1), orientation(&b.p1, &b.p2, &a.p2))
}

/// Walks the faces crossed by `e` from `e.p1` to `e.p2` and returns the
/// boundary of the cavity on each side of `e`. Both chains start at `e.p1`
/// and end at `e.p2`. Every apex is classified against the line of `e`.
fn cavity_chains(e: &Edge, mut faces: Vec<Triangle>) -> (Vec<Point>, Vec<Point>) {
    let (a, b) = (e.p1, e.p2);
    let side = |q: &Point| orientation(&a, &b, q);

    let Some(first) = faces.iter().position(|t| t.has_point(&a)) else {
        panic!("no crossed face starts at {a}");
    };
    let far = faces.swap_remove(first).edge_without_point(&a);
    let (mut up, mut down) = if side(&far.p1) == Ordering::Greater {
        (far.p1, far.p2)
    } else {
        (far.p2, far.p1)
    };
    assert!(
        side(&up) == Ordering::Greater && side(&down) == Ordering::Less,
        "constraint {e:?} does not leave {a} through the opposite side"
    );

    let mut upper = vec![a, up];
    let mut lower = vec![a, down];
    loop {
        let Some(next) = faces.iter().position(|t| t.has_point(&up) && t.has_point(&down)) else {
            panic!("cavity of {e:?} is not connected");
        };
        let face = faces.swap_remove(next);
        let apex = face.point_not_in_edge(&Edge::new(up, down));
        if apex == b {
            upper.push(b);
            lower.push(b);
            break;
        }
        match side(&apex) {
            Ordering::Greater => {
                upper.push(apex);
                up = apex;
            }
            Ordering::Less => {
                lower.push(apex);
                down = apex;
            }
            Ordering::Equal => panic!("{apex} lies on constraint {e:?}"),
        }
    }
    debug_assert!(faces.is_empty(), "crossed faces left outside the cavity");

    (upper, lower)
}

/// Delaunay triangulation of a cavity chain `[base start, .., base end]`.
///
/// Picks the chain vertex whose circle through the base holds no other
/// chain vertex, emits that triangle and recurses on the two sub-chains.
pub(crate) fn triangulate_region(region: &[Point]) -> Vec<Triangle> {
    if region.len() < 3 {
        return Vec::new();
    }
    let (first, last) = (region[0], region[region.len() - 1]);
    let inner = &region[1..region.len() - 1];

    let mut pick = 0;
    for (i, candidate) in inner.iter().enumerate().skip(1) {
        if in_circle(&first, &inner[pick], &last, candidate) == Ordering::Greater {
            pick = i;
        }
    }

    let mut faces = vec![Triangle::new(first, inner[pick], last)];
    faces.extend(triangulate_region(&region[..=pick + 1]));
    faces.extend(triangulate_region(&region[pick + 1..]));
    faces
}

/// Link of `p` as a counter-clockwise polygon. Panics if the faces around
/// `p` do not close up, which is the case on the mesh boundary.
fn star_polygon<'a>(p: &Point, star: impl Iterator<Item = &'a Triangle>) -> Vec<Point> {
    let mut next: AHashMap<Point, Point> = AHashMap::new();
    for face in star {
        let far = face.edge_without_point(p);
        let (from, to) = if orientation(p, &far.p1, &far.p2) == Ordering::Greater {
            (far.p1, far.p2)
        } else {
            (far.p2, far.p1)
        };
        next.insert(from, to);
    }

    let Some(start) = next.keys().min().copied() else {
        panic!("{p} has no incident faces");
    };
    let mut polygon = vec![start];
    let mut current = start;
    loop {
        let Some(to) = next.get(&current).copied() else {
            panic!("{p} is on the boundary of the mesh");
        };
        if to == start {
            break;
        }
        assert!(polygon.len() < next.len(), "faces around {p} do not form a fan");
        polygon.push(to);
        current = to;
    }
    assert_eq!(polygon.len(), next.len(), "faces around {p} do not form a fan");
    polygon
}

/// Ear-clips the hole left by `p`, taking only ears that are Delaunay with
/// respect to the rest of the polygon and that keep `p` inside what remains.
fn fill_star_hole(p: &Point, mut polygon: Vec<Point>) -> Vec<Triangle> {
    let mut faces = Vec::with_capacity(polygon.len().saturating_sub(2));

    while polygon.len() > 3 {
        let n = polygon.len();
        let ear = (0..n).find(|&i| {
            let (a, b, c) = (polygon[i], polygon[(i + 1) % n], polygon[(i + 2) % n]);
            orientation(&a, &b, &c) == Ordering::Greater
                && orientation(&a, &c, p) != Ordering::Less
                && polygon
                    .iter()
                    .filter(|q| **q != a && **q != b && **q != c)
                    .all(|q| in_circle(&a, &b, &c, q) != Ordering::Greater)
        });
        let Some(i) = ear else {
            panic!("no Delaunay ear left around {p}");
        };
        faces.push(Triangle::new(polygon[i], polygon[(i + 1) % n], polygon[(i + 2) % n]));
        polygon.remove((i + 1) % n);
    }

    faces.push(Triangle::new(polygon[0], polygon[1], polygon[2]));
    faces
}
