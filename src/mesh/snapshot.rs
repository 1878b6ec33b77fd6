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

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::NavmeshConfig;
use crate::error::NavmeshError;
use crate::geometry::point::Point;
use crate::geometry::triangle::Polypoint;
use crate::graph::{Graph, GraphSnapshot};
use crate::mesh::location_tree::{TreeSnapshot, TriangleTree};
use crate::mesh::triangle_graph::{MeshState, TriangleGraph};

/// Plain, serializable copy of a [`TriangleGraph`].
///
/// Taking a snapshot of a mesh rebuilt from a snapshot gives back an equal
/// snapshot: every list is sorted and the tree keeps its arena order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangleGraphSnapshot {
    pub config: NavmeshConfig,
    pub state: MeshState,
    /// Vertices, adjacency and collinear index of the triangulation.
    pub graph: GraphSnapshot<Point>,
    pub fixed: Vec<(Point, Vec<Point>)>,
    pub polypoints: GraphSnapshot<Polypoint>,
    pub tree: Option<TreeSnapshot>,
}

impl TriangleGraph {
    pub fn to_snapshot(&self) -> TriangleGraphSnapshot {
        let mut fixed: Vec<(Point, Vec<Point>)> = self
            .fixed
            .iter()
            .map(|(p, neighbors)| {
                let mut neighbors = neighbors.clone();
                neighbors.sort();
                (*p, neighbors)
            })
            .collect();
        fixed.sort_by(|a, b| a.0.cmp(&b.0));

        TriangleGraphSnapshot {
            config: self.config.clone(),
            state: self.state,
            graph: self.graph.to_snapshot(),
            fixed,
            polypoints: self.polypoints.to_snapshot(),
            tree: self.tree.as_ref().map(TriangleTree::to_snapshot),
        }
    }

    pub fn from_snapshot(snapshot: &TriangleGraphSnapshot) -> Result<Self, NavmeshError> {
        let graph = Graph::from_snapshot(&snapshot.graph)?;
        let polypoints = Graph::from_snapshot(&snapshot.polypoints)?;
        let tree = snapshot
            .tree
            .as_ref()
            .map(TriangleTree::from_snapshot)
            .transpose()?;

        let mut fixed: AHashMap<Point, Vec<Point>> = AHashMap::new();
        for (p, neighbors) in &snapshot.fixed {
            for q in neighbors {
                if p == q || !graph.is_connected(p, q) {
                    return Err(NavmeshError::SnapshotUnknownFixedEdge {
                        edge: format!("{p} - {q}"),
                    });
                }
            }
            if !neighbors.is_empty() {
                fixed.insert(*p, neighbors.clone());
            }
        }
        for (p, neighbors) in &fixed {
            for q in neighbors {
                if !fixed.get(q).is_some_and(|back| back.contains(p)) {
                    return Err(NavmeshError::SnapshotAsymmetricAdjacency {
                        from: p.to_string(),
                        to: q.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            vertices = graph.num_vertices(),
            walls = fixed.values().map(Vec::len).sum::<usize>() / 2,
            "restored navmesh from snapshot"
        );
        Ok(TriangleGraph {
            graph,
            fixed,
            polypoints,
            tree,
            config: snapshot.config.clone(),
            state: snapshot.state,
        })
    }
}
