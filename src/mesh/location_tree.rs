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

//! Triangle history used for point location.
//!
//! Every triangle the mesh has ever held is a node in one arena. Replacing a
//! triangle never mutates it: the replacements are appended and linked as
//! children of the superseded node, which then counts as dead. Walking from
//! the root down through nodes that contain a query point therefore always
//! ends at the live triangles containing it.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::NavmeshError;
use crate::geometry::edge::Edge;
use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;
use crate::kernel::predicates::are_collinear;

/// Index of a node in the [`TriangleTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct TriangleNode {
    triangle: Triangle,
    children: SmallVec<[NodeId; 4]>,
    retired: bool,
}

impl TriangleNode {
    #[inline]
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Live nodes are the current faces of the mesh.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.children.is_empty() && !self.retired
    }
}

/// Outcome of inserting a point into the live triangulation.
#[derive(Clone, Debug)]
pub struct Split {
    pub superseded: Vec<NodeId>,
    pub created: Vec<NodeId>,
    /// The side the point landed on, when it was not strictly interior.
    pub split_edge: Option<Edge>,
}

#[derive(Clone, Debug)]
pub struct TriangleTree {
    nodes: Vec<TriangleNode>,
    root: NodeId,
    /// Live nodes by corner.
    incident: AHashMap<Point, SmallVec<[NodeId; 8]>>,
}

impl TriangleTree {
    pub fn new(root: Triangle) -> Self {
        let mut tree = TriangleTree {
            nodes: Vec::new(),
            root: NodeId(0),
            incident: AHashMap::new(),
        };
        tree.push(root);
        tree
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes, dead ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TriangleNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn triangle(&self, id: NodeId) -> &Triangle {
        &self.nodes[id.0].triangle
    }

    #[inline]
    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_live()
    }

    fn push(&mut self, triangle: Triangle) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TriangleNode {
            triangle,
            children: SmallVec::new(),
            retired: false,
        });
        self.index_corners(id);
        id
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        if self.is_live(parent) {
            self.unindex_corners(parent);
        }
        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    fn index_corners(&mut self, id: NodeId) {
        for corner in *self.nodes[id.0].triangle.points() {
            self.incident.entry(corner).or_default().push(id);
        }
    }

    fn unindex_corners(&mut self, id: NodeId) {
        for corner in self.nodes[id.0].triangle.points() {
            if let Some(faces) = self.incident.get_mut(corner) {
                faces.retain(|f| *f != id);
                if faces.is_empty() {
                    self.incident.remove(corner);
                }
            }
        }
    }

    // ---------- Queries ----------

    /// Depth-first walk from the root, entering only nodes whose triangle
    /// passes `keep`, and collecting the live ones.
    fn descend(&self, keep: impl Fn(&Triangle) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut visited: AHashSet<NodeId> = AHashSet::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = &self.nodes[id.0];
            if !keep(&node.triangle) {
                continue;
            }
            if node.is_live() {
                found.push(id);
            } else {
                stack.extend(node.children.iter().copied());
            }
        }

        found.sort();
        found
    }

    /// Live nodes whose closed triangle contains `p`: one for an interior
    /// point, two on a shared side, every incident face for a vertex.
    pub fn find_containing_nodes(&self, p: &Point) -> Vec<NodeId> {
        self.descend(|t| t.contains_point(p))
    }

    /// Live nodes with `p` as a corner, sorted.
    pub fn faces_around(&self, p: &Point) -> Vec<NodeId> {
        let mut faces: Vec<NodeId> = self
            .incident
            .get(p)
            .map(|faces| faces.to_vec())
            .unwrap_or_default();
        faces.sort();
        faces
    }

    /// Live nodes having `e` as a side.
    pub fn find_nodes_with_edge(&self, e: &Edge) -> Vec<NodeId> {
        self.faces_around(&e.p1)
            .into_iter()
            .filter(|id| self.triangle(*id).has_edge(e))
            .collect()
    }

    /// The live node on the other side of `e` from `triangle`, if any.
    pub fn find_node_across(&self, triangle: &Triangle, e: &Edge) -> Option<NodeId> {
        let with_edge = self.find_nodes_with_edge(e);
        assert!(
            with_edge.len() <= 2,
            "edge {e:?} is shared by {} live triangles",
            with_edge.len()
        );
        with_edge
            .into_iter()
            .find(|id| self.triangle(*id) != triangle)
    }

    /// Live nodes the closed segment `e` touches.
    pub fn find_nodes_touching_edge(&self, e: &Edge) -> Vec<NodeId> {
        self.descend(|t| t.intersects_edge(e))
    }

    /// Live nodes whose interior the open segment `e` passes through.
    ///
    /// The walk prunes with the closed test: after a flip, `e` may run along
    /// a side of both superseded faces while crossing their replacements.
    pub fn find_nodes_crossing_edge(&self, e: &Edge) -> Vec<NodeId> {
        self.descend(|t| t.intersects_edge(e))
            .into_iter()
            .filter(|id| self.triangle(*id).is_crossed_by(e))
            .collect()
    }

    pub fn live_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.is_live(*id))
            .collect()
    }

    /// Live triangles, sorted.
    pub fn triangles(&self) -> Vec<Triangle> {
        let mut triangles: Vec<Triangle> = self
            .live_nodes()
            .into_iter()
            .map(|id| self.triangle(id).clone())
            .collect();
        triangles.sort();
        triangles
    }

    // ---------- Growth ----------

    /// Splits the live face(s) containing `p` into triangles fanning around it.
    ///
    /// Interior points split one face into three; a point on a side shared
    /// by two faces splits both into two; a point on an outer side splits its
    /// single face into two. Panics when no face contains `p` or when `p` is
    /// already a corner.
    pub fn split(&mut self, p: Point) -> Split {
        let containing = self.find_containing_nodes(&p);
        assert!(!containing.is_empty(), "no live triangle contains {p}");
        assert!(
            containing.iter().all(|id| !self.triangle(*id).has_point(&p)),
            "{p} is already a vertex of the triangulation"
        );

        let split_edge = match containing.as_slice() {
            [single] => self
                .triangle(*single)
                .edges()
                .into_iter()
                .find(|e| e.is_between_points(&p, true)),
            [a, b] => {
                let shared = self.triangle(*a).shared_edge(self.triangle(*b));
                assert!(shared.is_some(), "{p} lies in two faces without a shared side");
                shared
            }
            _ => panic!("{p} is contained by {} live triangles", containing.len()),
        };

        let mut created = Vec::with_capacity(4);
        for &parent in &containing {
            let triangle = self.triangle(parent).clone();
            let pieces: Vec<Triangle> = match &split_edge {
                Some(e) => {
                    let apex = triangle.point_not_in_edge(e);
                    vec![Triangle::new(p, e.p1, apex), Triangle::new(p, e.p2, apex)]
                }
                None => {
                    let [a, b, c] = *triangle.points();
                    vec![
                        Triangle::new(p, a, b),
                        Triangle::new(p, b, c),
                        Triangle::new(p, a, c),
                    ]
                }
            };
            for piece in pieces {
                let child = self.push(piece);
                self.adopt(parent, child);
                created.push(child);
            }
        }

        tracing::trace!(point = %p, created = created.len(), "split live triangles");
        Split {
            superseded: containing,
            created,
            split_edge,
        }
    }

    /// Replaces live nodes `old` by `new`, which must cover the same region.
    /// Each new node becomes a child of every old one; descending prunes the
    /// links that do not overlap.
    pub fn replace(&mut self, old: &[NodeId], new: Vec<Triangle>) -> Vec<NodeId> {
        assert!(
            old.iter().all(|id| self.is_live(*id)),
            "only live triangles can be replaced"
        );
        let created: Vec<NodeId> = new.into_iter().map(|t| self.push(t)).collect();
        for &parent in old {
            for &child in &created {
                self.adopt(parent, child);
            }
        }
        created
    }

    /// Drops live nodes from the mesh without replacing them.
    pub fn retire(&mut self, ids: &[NodeId]) {
        for id in ids {
            assert!(self.is_live(*id), "only live triangles can be retired");
            self.unindex_corners(*id);
            self.nodes[id.0].retired = true;
        }
    }

    // ---------- Snapshot ----------

    pub fn to_snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            root: self.root.0,
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSnapshot {
                    triangle: node.triangle.clone(),
                    children: node.children.iter().map(|c| c.0).collect(),
                    retired: node.retired,
                })
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: &TreeSnapshot) -> Result<Self, NavmeshError> {
        let len = snapshot.nodes.len();
        let check = |index: usize| {
            if index < len {
                Ok(NodeId(index))
            } else {
                Err(NavmeshError::SnapshotUnknownNode { index, len })
            }
        };

        let root = check(snapshot.root)?;
        let mut nodes = Vec::with_capacity(len);
        for (index, node) in snapshot.nodes.iter().enumerate() {
            let [a, b, c] = node.triangle.points();
            if are_collinear(a, b, c) {
                return Err(NavmeshError::SnapshotDegenerateTriangle { index });
            }
            let children = node
                .children
                .iter()
                .map(|c| check(*c))
                .collect::<Result<SmallVec<[NodeId; 4]>, _>>()?;
            nodes.push(TriangleNode {
                triangle: node.triangle.clone(),
                children,
                retired: node.retired,
            });
        }

        let mut tree = TriangleTree {
            nodes,
            root,
            incident: AHashMap::new(),
        };
        for id in tree.live_nodes() {
            tree.index_corners(id);
        }
        Ok(tree)
    }
}

/// Arena order is kept, so a restored tree snapshots identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub root: usize,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub triangle: Triangle,
    pub children: Vec<usize>,
    #[serde(default)]
    pub retired: bool,
}
