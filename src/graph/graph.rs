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

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::NavmeshError;
use crate::geometry::edge::Edge;
use crate::geometry::point::{Point, Vertex};
use crate::graph::collinear::{CollinearEntry, CollinearIndex};

/// Undirected planar graph keyed by vertex identity.
///
/// Adjacency is kept symmetric and every edge is mirrored in a
/// [`CollinearIndex`], so all edges on a given line can be fetched without
/// scanning the graph.
#[derive(Clone, Debug)]
pub struct Graph<V: Vertex = Point> {
    adjacency: AHashMap<V, Vec<V>>,
    collinear: CollinearIndex<V>,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Graph {
            adjacency: AHashMap::new(),
            collinear: CollinearIndex::default(),
        }
    }
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------- Vertices ----------

    #[inline]
    pub fn has_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// All vertices, sorted.
    pub fn vertices(&self) -> Vec<V> {
        let mut vertices: Vec<V> = self.adjacency.keys().cloned().collect();
        vertices.sort();
        vertices
    }

    /// Returns `false` when the vertex was already there.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.has_vertex(&v) {
            return false;
        }
        self.adjacency.insert(v, Vec::new());
        true
    }

    /// Removes `v` together with every edge touching it.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        let Some(neighbors) = self.adjacency.get(v).cloned() else {
            return false;
        };
        for n in neighbors {
            self.remove_edge(&Edge::new(v.clone(), n));
        }
        self.adjacency.remove(v);
        true
    }

    /// Neighbours of `v`. Panics if `v` is not in the graph.
    pub fn neighbors(&self, v: &V) -> &[V] {
        match self.adjacency.get(v) {
            Some(neighbors) => neighbors,
            None => panic!("vertex {v:?} is not in the graph"),
        }
    }

    // ---------- Edges ----------

    pub fn is_connected(&self, a: &V, b: &V) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    #[inline]
    pub fn has_edge(&self, e: &Edge<V>) -> bool {
        self.is_connected(&e.p1, &e.p2)
    }

    /// Both endpoints must already be vertices. Returns `false` when the
    /// edge was already there.
    pub fn add_edge(&mut self, e: Edge<V>) -> bool {
        assert!(
            self.has_vertex(&e.p1) && self.has_vertex(&e.p2),
            "cannot add {e:?}: both endpoints must be vertices of the graph"
        );
        if self.has_edge(&e) {
            return false;
        }
        self.link(&e.p1, &e.p2);
        self.link(&e.p2, &e.p1);
        self.collinear.insert(e);
        true
    }

    pub fn add_edge_and_vertices(&mut self, e: Edge<V>) -> bool {
        self.add_vertex(e.p1.clone());
        self.add_vertex(e.p2.clone());
        self.add_edge(e)
    }

    fn link(&mut self, from: &V, to: &V) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.push(to.clone());
        }
    }

    fn unlink(&mut self, from: &V, to: &V) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.retain(|n| n != to);
        }
    }

    pub fn remove_edge(&mut self, e: &Edge<V>) -> bool {
        if !self.has_edge(e) {
            return false;
        }
        self.unlink(&e.p1, &e.p2);
        self.unlink(&e.p2, &e.p1);
        self.collinear.remove(e);
        true
    }

    /// Removes the edge, then any endpoint it leaves isolated.
    pub fn remove_edge_and_vertices(&mut self, e: &Edge<V>) -> bool {
        if !self.remove_edge(e) {
            return false;
        }
        for v in [&e.p1, &e.p2] {
            if self.adjacency.get(v).is_some_and(Vec::is_empty) {
                self.adjacency.remove(v);
            }
        }
        true
    }

    /// Every edge once, sorted.
    pub fn edges(&self) -> Vec<Edge<V>> {
        let mut edges: Vec<Edge<V>> = self
            .adjacency
            .iter()
            .flat_map(|(v, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |n| v < *n)
                    .map(move |n| Edge::new(v.clone(), n.clone()))
            })
            .collect();
        edges.sort();
        edges
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn edges_in_line_with(&self, e: &Edge<V>) -> &[Edge<V>] {
        self.collinear.edges_in_line_with(e)
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.collinear.clear();
    }

    // ---------- Snapshot ----------

    pub fn to_snapshot(&self) -> GraphSnapshot<V> {
        let adjacency = self
            .vertices()
            .into_iter()
            .map(|v| {
                let mut neighbors = self.neighbors(&v).to_vec();
                neighbors.sort();
                (v, neighbors)
            })
            .collect();
        GraphSnapshot {
            adjacency,
            collinear: self.collinear.entries(),
        }
    }

    /// Rebuilds a graph, checking symmetry and that the stored collinear
    /// index matches the edges.
    pub fn from_snapshot(snapshot: &GraphSnapshot<V>) -> Result<Self, NavmeshError> {
        let mut adjacency: AHashMap<V, Vec<V>> = AHashMap::with_capacity(snapshot.adjacency.len());
        for (v, neighbors) in &snapshot.adjacency {
            adjacency.insert(v.clone(), neighbors.clone());
        }

        let mut seen: AHashSet<Edge<V>> = AHashSet::new();
        let mut collinear = CollinearIndex::default();
        for (v, neighbors) in &adjacency {
            for n in neighbors {
                let Some(back) = adjacency.get(n) else {
                    return Err(NavmeshError::SnapshotUnknownVertex {
                        vertex: format!("{n:?}"),
                    });
                };
                if !back.contains(v) {
                    return Err(NavmeshError::SnapshotAsymmetricAdjacency {
                        from: format!("{v:?}"),
                        to: format!("{n:?}"),
                    });
                }
                let edge = Edge::new(v.clone(), n.clone());
                if seen.insert(edge.clone()) {
                    collinear.insert(edge);
                }
            }
        }

        if collinear.entries() != snapshot.collinear {
            return Err(NavmeshError::SnapshotCollinearMismatch);
        }

        Ok(Graph {
            adjacency,
            collinear,
        })
    }
}

/// Plain, serializable form of a [`Graph`]. Vertices and neighbour lists are
/// sorted so equal graphs produce equal snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<V> {
    pub adjacency: Vec<(V, Vec<V>)>,
    pub collinear: Vec<CollinearEntry<V>>,
}
