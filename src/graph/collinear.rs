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

use crate::geometry::edge::{Edge, LineKey, Slope};
use crate::geometry::point::Vertex;
use crate::numeric::ExactRational;

/// Edges grouped by the exact line they lie on: slope, then intercept.
#[derive(Clone, Debug)]
pub struct CollinearIndex<V: Vertex> {
    lines: AHashMap<Slope, AHashMap<ExactRational, Vec<Edge<V>>>>,
}

/// One line of the index, in plain form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollinearEntry<V> {
    pub slope: Slope,
    pub intercept: ExactRational,
    pub edges: Vec<Edge<V>>,
}

impl<V: Vertex> Default for CollinearIndex<V> {
    fn default() -> Self {
        CollinearIndex {
            lines: AHashMap::new(),
        }
    }
}

impl<V: Vertex> CollinearIndex<V> {
    pub fn insert(&mut self, edge: Edge<V>) {
        let LineKey { slope, intercept } = edge.line_key();
        self.lines
            .entry(slope)
            .or_default()
            .entry(intercept)
            .or_default()
            .push(edge);
    }

    pub fn remove(&mut self, edge: &Edge<V>) {
        let LineKey { slope, intercept } = edge.line_key();
        let Some(by_intercept) = self.lines.get_mut(&slope) else {
            return;
        };
        if let Some(edges) = by_intercept.get_mut(&intercept) {
            edges.retain(|e| e != edge);
            if edges.is_empty() {
                by_intercept.remove(&intercept);
            }
        }
        if by_intercept.is_empty() {
            self.lines.remove(&slope);
        }
    }

    /// Every indexed edge on the same line as `edge`, `edge` included if present.
    pub fn edges_in_line_with(&self, edge: &Edge<V>) -> &[Edge<V>] {
        let LineKey { slope, intercept } = edge.line_key();
        self.lines
            .get(&slope)
            .and_then(|by_intercept| by_intercept.get(&intercept))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sorted by line, with each line's edges sorted.
    pub fn entries(&self) -> Vec<CollinearEntry<V>> {
        let mut entries: Vec<CollinearEntry<V>> = self
            .lines
            .iter()
            .flat_map(|(slope, by_intercept)| {
                by_intercept.iter().map(move |(intercept, edges)| {
                    let mut edges = edges.clone();
                    edges.sort();
                    CollinearEntry {
                        slope: slope.clone(),
                        intercept: intercept.clone(),
                        edges,
                    }
                })
            })
            .collect();
        entries.sort_by(|a, b| (&a.slope, &a.intercept).cmp(&(&b.slope, &b.intercept)));
        entries
    }
}
