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

use std::f64::consts::PI;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::config::NavmeshConfig;
use crate::geometry::edge::Edge;
use crate::geometry::point::Point;
use crate::geometry::triangle::{Polypoint, Triangle};
use crate::geometry::vector::Vector;
use crate::graph::Graph;
use crate::mesh::location_tree::{NodeId, TriangleTree};

/// Lifecycle of a [`TriangleGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshState {
    /// No triangle yet.
    Empty,
    /// Holds only the super-triangle.
    Bootstrapped,
    /// At least one vertex or constraint has been inserted.
    Triangulated,
}

/// Constrained Delaunay navmesh.
///
/// Wraps the vertex/edge [`Graph`] of the triangulation with the set of
/// fixed (wall) edges, the dual graph of triangle centers, and the location
/// tree holding every face. All four are updated together by the mutating
/// operations so their invariants hold between calls:
///
/// - every live triangle has its three sides in the graph and one
///   [`Polypoint`] in the dual graph;
/// - two polypoints are linked iff their triangles share a side that is not
///   fixed;
/// - fixed edges are a subset of the graph's edges.
#[derive(Clone, Debug)]
pub struct TriangleGraph {
    pub(crate) graph: Graph<Point>,
    pub(crate) fixed: AHashMap<Point, Vec<Point>>,
    pub(crate) polypoints: Graph<Polypoint>,
    pub(crate) tree: Option<TriangleTree>,
    pub(crate) config: NavmeshConfig,
    pub(crate) state: MeshState,
}

impl TriangleGraph {
    pub fn new(config: NavmeshConfig) -> Self {
        TriangleGraph {
            graph: Graph::new(),
            fixed: AHashMap::new(),
            polypoints: Graph::new(),
            tree: None,
            config,
            state: MeshState::Empty,
        }
    }

    /// A mesh already holding the configured super-triangle.
    pub fn bootstrapped(config: NavmeshConfig) -> Self {
        let mut mesh = TriangleGraph::new(config);
        mesh.bootstrap();
        mesh
    }

    /// Empty → Bootstrapped: installs the super-triangle.
    pub fn bootstrap(&mut self) {
        assert_eq!(
            self.state,
            MeshState::Empty,
            "only an empty mesh can be bootstrapped"
        );
        let [a, b, c] = self.config.super_triangle;
        let root = Triangle::new(a, b, c);
        for e in root.edges() {
            self.graph.add_edge_and_vertices(e);
        }
        self.polypoints.add_vertex(root.center());
        self.tree = Some(TriangleTree::new(root));
        self.state = MeshState::Bootstrapped;
        tracing::debug!(?a, ?b, ?c, "bootstrapped navmesh");
    }

    // ---------- Accessors ----------

    #[inline]
    pub fn state(&self) -> MeshState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &NavmeshConfig {
        &self.config
    }

    /// Vertices and edges of the triangulation.
    #[inline]
    pub fn graph(&self) -> &Graph<Point> {
        &self.graph
    }

    /// Triangle centers linked across passable sides.
    #[inline]
    pub fn polypoints(&self) -> &Graph<Polypoint> {
        &self.polypoints
    }

    #[inline]
    pub fn location_tree(&self) -> Option<&TriangleTree> {
        self.tree.as_ref()
    }

    pub(crate) fn tree(&self) -> &TriangleTree {
        match &self.tree {
            Some(tree) => tree,
            None => panic!("the navmesh has not been bootstrapped"),
        }
    }

    pub(crate) fn tree_mut(&mut self) -> &mut TriangleTree {
        match &mut self.tree {
            Some(tree) => tree,
            None => panic!("the navmesh has not been bootstrapped"),
        }
    }

    // ---------- Queries ----------

    /// Live triangles containing `p`; empty when none does.
    pub fn find_containing_triangles(&self, p: &Point) -> Vec<Triangle> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.find_containing_nodes(p)
            .into_iter()
            .map(|id| tree.triangle(id).clone())
            .collect()
    }

    /// The polypoint of a triangle containing `p`.
    pub fn polypoint_at(&self, p: &Point) -> Option<Polypoint> {
        self.find_containing_triangles(p)
            .first()
            .map(Triangle::center)
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        self.tree.as_ref().map(TriangleTree::triangles).unwrap_or_default()
    }

    pub fn num_triangles(&self) -> usize {
        self.tree
            .as_ref()
            .map_or(0, |tree| tree.live_nodes().len())
    }

    pub fn triangles_with_edge(&self, e: &Edge) -> Vec<Triangle> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.find_nodes_with_edge(e)
            .into_iter()
            .map(|id| tree.triangle(id).clone())
            .collect()
    }

    // ---------- Fixed edges ----------

    pub fn is_edge_fixed(&self, e: &Edge) -> bool {
        self.fixed
            .get(&e.p1)
            .is_some_and(|neighbors| neighbors.contains(&e.p2))
    }

    /// Endpoints of the fixed edges at `p`.
    pub fn fixed_neighbors(&self, p: &Point) -> &[Point] {
        self.fixed.get(p).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every fixed edge once, sorted.
    pub fn fixed_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .fixed
            .iter()
            .flat_map(|(p, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |q| p < *q)
                    .map(move |q| Edge::new(*p, *q))
            })
            .collect();
        edges.sort();
        edges
    }

    pub(crate) fn fix(&mut self, e: &Edge) {
        if self.is_edge_fixed(e) {
            return;
        }
        self.fixed.entry(e.p1).or_default().push(e.p2);
        self.fixed.entry(e.p2).or_default().push(e.p1);
    }

    pub(crate) fn unfix(&mut self, e: &Edge) {
        for (from, to) in [(e.p1, e.p2), (e.p2, e.p1)] {
            if let Some(neighbors) = self.fixed.get_mut(&from) {
                neighbors.retain(|n| *n != to);
                if neighbors.is_empty() {
                    self.fixed.remove(&from);
                }
            }
        }
    }

    // ---------- Clearance ----------

    /// Point offset from a convex wall corner along its outer bisector.
    ///
    /// Only corners joining exactly two fixed edges are moved; any other
    /// vertex is returned as is.
    pub fn clearance_point(&self, corner: &Point) -> Point {
        let walls = self.fixed_neighbors(corner);
        let [prev, next] = walls else {
            return *corner;
        };

        let prev_angle = (*prev - *corner).angle();
        let next_angle = (*next - *corner).angle();
        let mut spread = next_angle - prev_angle;
        if spread.abs() > PI {
            spread -= 2.0 * PI * spread.signum();
        }
        let outward = prev_angle + spread / 2.0 + PI;

        corner.translated(&Vector::from_angle(outward).scale(self.config.clearance))
    }

    // ---------- Face bookkeeping ----------

    /// Swaps live faces `old` for `new` in the tree, then brings the graph
    /// and the polypoint graph in line.
    pub(crate) fn replace_faces(&mut self, old: &[NodeId], new: Vec<Triangle>) -> Vec<NodeId> {
        let retired: Vec<Triangle> = old
            .iter()
            .map(|id| self.tree().triangle(*id).clone())
            .collect();
        let created = self.tree_mut().replace(old, new);
        self.commit_faces(&retired, &created);
        created
    }

    /// Applies a face swap that already happened in the tree.
    pub(crate) fn commit_faces(&mut self, retired: &[Triangle], created: &[NodeId]) {
        let fresh: Vec<Triangle> = created
            .iter()
            .map(|id| self.tree().triangle(*id).clone())
            .collect();
        let fresh_edges: AHashSet<Edge> = fresh.iter().flat_map(Triangle::edges).collect();

        for triangle in retired {
            self.polypoints.remove_vertex(&triangle.center());
            for e in triangle.edges() {
                if !fresh_edges.contains(&e) {
                    self.graph.remove_edge(&e);
                }
            }
        }

        for e in fresh_edges {
            self.graph.add_edge_and_vertices(e);
        }
        for triangle in &fresh {
            self.polypoints.add_vertex(triangle.center());
        }
        for triangle in &fresh {
            self.link_polypoint(triangle);
        }
    }

    /// Links `triangle`'s polypoint to its neighbours across passable sides.
    pub(crate) fn link_polypoint(&mut self, triangle: &Triangle) {
        let tree = self.tree();
        let neighbours: Vec<Polypoint> = triangle
            .edges()
            .iter()
            .filter(|e| !self.is_edge_fixed(e))
            .filter_map(|e| tree.find_node_across(triangle, e))
            .map(|id| tree.triangle(id).center())
            .collect();

        let center = triangle.center();
        for other in neighbours {
            self.polypoints.add_edge(Edge::new(center.clone(), other));
        }
    }

    /// Drops the polypoint link across `e`, if two faces share it.
    pub(crate) fn unlink_across(&mut self, e: &Edge) {
        if let [a, b] = self.triangles_with_edge(e).as_slice() {
            self.polypoints.remove_edge(&Edge::new(a.center(), b.center()));
        }
    }

    /// Restores the polypoint link across `e`, if two faces share it.
    pub(crate) fn link_across(&mut self, e: &Edge) {
        if let [a, b] = self.triangles_with_edge(e).as_slice() {
            self.polypoints.add_edge(Edge::new(a.center(), b.center()));
        }
    }
}
