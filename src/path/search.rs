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

//! Best-first search over an abstract state space.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::geometry::triangle::Polypoint;
use crate::graph::Graph;

/// A state the search can expand.
///
/// The search owns the `g`/`f`/`parent` bookkeeping; a state only says who
/// it is, how far it guesses the goal is and where it can go next.
pub trait SearchState: Sized {
    /// Identity used by the open and closed sets.
    type Key: Eq + Hash + Clone;
    /// Whatever `neighbors` needs to look at, usually a graph.
    type Context: ?Sized;

    fn key(&self) -> Self::Key;

    /// Estimated remaining cost to `goal`. Must never overestimate and must
    /// be consistent for the first path found to be optimal.
    fn heuristic(&self, goal: &Self) -> f64;

    /// Successors of this state, with `g` already including the step cost.
    fn neighbors(&self, g: f64, context: &Self::Context) -> Vec<Successor<Self>>;

    fn equals(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// A successor and its cost from the start.
#[derive(Clone, Debug, PartialEq)]
pub struct Successor<S> {
    pub state: S,
    pub g: f64,
}

/// A state in the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,
    /// Cost from the start.
    pub g: f64,
    /// `g` plus the heuristic.
    pub f: f64,
    /// Node this one was expanded from.
    pub parent: Option<usize>,
}

/// Heap entry, ordered so the lowest `f` pops first.
#[derive(Clone, Copy, Debug)]
struct Open {
    f: f64,
    g: f64,
    node: usize,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; on equal f prefer the deeper node.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* from `start` to `goal`. Returns the states along the path, both ends
/// included, or `None` when the goal is unreachable.
pub fn astar<S: SearchState>(start: S, goal: &S, context: &S::Context) -> Option<Vec<S>> {
    let mut nodes: Vec<SearchNode<S>> = Vec::new();
    let mut best: AHashMap<S::Key, usize> = AHashMap::new();
    let mut closed: AHashSet<S::Key> = AHashSet::new();
    let mut open = BinaryHeap::new();

    let f = start.heuristic(goal);
    best.insert(start.key(), 0);
    nodes.push(SearchNode {
        state: start,
        g: 0.0,
        f,
        parent: None,
    });
    open.push(Open { f, g: 0.0, node: 0 });

    while let Some(Open { node: current, .. }) = open.pop() {
        let key = nodes[current].state.key();
        if closed.contains(&key) || best.get(&key) != Some(&current) {
            continue;
        }
        if nodes[current].state.equals(goal) {
            tracing::trace!(expanded = closed.len(), "search reached goal");
            return Some(reconstruct(nodes, current));
        }
        closed.insert(key);

        let g = nodes[current].g;
        for Successor { state, g } in nodes[current].state.neighbors(g, context) {
            let key = state.key();
            if closed.contains(&key) {
                continue;
            }
            if best.get(&key).is_some_and(|known| nodes[*known].g <= g) {
                continue;
            }
            let f = g + state.heuristic(goal);
            let index = nodes.len();
            nodes.push(SearchNode {
                state,
                g,
                f,
                parent: Some(current),
            });
            best.insert(key, index);
            open.push(Open { f, g, node: index });
        }
    }

    tracing::trace!(expanded = closed.len(), "search exhausted");
    None
}

/// Follows parent links back to the start.
fn reconstruct<S>(nodes: Vec<SearchNode<S>>, goal: usize) -> Vec<S> {
    let mut order = Vec::new();
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        order.push(index);
        cursor = nodes[index].parent;
    }
    let mut slots: Vec<Option<S>> = nodes.into_iter().map(|n| Some(n.state)).collect();
    order
        .into_iter()
        .rev()
        .filter_map(|i| slots[i].take())
        .collect()
}

// ---------- Polypoint search ----------

/// Search state walking the dual graph of a navmesh.
///
/// Steps cost the distance between triangle centers and the heuristic is
/// the straight-line distance, which keeps it consistent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PolypointState {
    pub polypoint: Polypoint,
}

impl PolypointState {
    pub fn new(polypoint: Polypoint) -> Self {
        PolypointState { polypoint }
    }
}

impl SearchState for PolypointState {
    type Key = Polypoint;
    type Context = Graph<Polypoint>;

    fn key(&self) -> Polypoint {
        self.polypoint.clone()
    }

    fn heuristic(&self, goal: &Self) -> f64 {
        self.polypoint.point.distance(&goal.polypoint.point)
    }

    fn neighbors(&self, g: f64, graph: &Graph<Polypoint>) -> Vec<Successor<Self>> {
        graph
            .neighbors(&self.polypoint)
            .iter()
            .map(|next| Successor {
                g: g + self.polypoint.point.distance(&next.point),
                state: PolypointState::new(next.clone()),
            })
            .collect()
    }
}
