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

use crate::error::NavmeshError;
use crate::mesh::{TriangleGraph, TriangleGraphSnapshot};

/// Keyed storage for mesh snapshots, typically one per map.
///
/// The store decides nothing: callers choose when to save and which key
/// names the current environment.
pub trait MeshStore {
    fn get(&self, key: &str) -> Option<TriangleGraphSnapshot>;

    fn put(&mut self, key: &str, snapshot: TriangleGraphSnapshot);

    fn remove(&mut self, key: &str) -> Option<TriangleGraphSnapshot>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    entries: AHashMap<String, TriangleGraphSnapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MeshStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<TriangleGraphSnapshot> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, snapshot: TriangleGraphSnapshot) {
        self.entries.insert(key.to_owned(), snapshot);
    }

    fn remove(&mut self, key: &str) -> Option<TriangleGraphSnapshot> {
        self.entries.remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Restores the mesh stored under `key`, or builds it and stores the result.
pub fn load_or_build<S: MeshStore + ?Sized>(
    store: &mut S,
    key: &str,
    build: impl FnOnce() -> TriangleGraph,
) -> Result<TriangleGraph, NavmeshError> {
    if let Some(snapshot) = store.get(key) {
        tracing::debug!(key, "navmesh loaded from store");
        return TriangleGraph::from_snapshot(&snapshot);
    }
    let mesh = build();
    store.put(key, mesh.to_snapshot());
    tracing::debug!(key, "navmesh built and stored");
    Ok(mesh)
}
