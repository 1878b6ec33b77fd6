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

use thiserror::Error;

/// Recoverable failures. Broken mesh contracts panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavmeshError {
    /// A location tree reference points outside the node arena.
    #[error("snapshot references tree node {index}, but only {len} nodes exist")]
    SnapshotUnknownNode {
        /// Offending index.
        index: usize,
        /// Number of nodes in the snapshot.
        len: usize,
    },
    /// An adjacency list names a vertex that has no entry of its own.
    #[error("snapshot references unregistered vertex {vertex}")]
    SnapshotUnknownVertex {
        /// Debug rendering of the vertex.
        vertex: String,
    },
    /// `to` is a neighbour of `from` but not the other way around.
    #[error("snapshot adjacency is not symmetric: {from} lists {to}, but not back")]
    SnapshotAsymmetricAdjacency { from: String, to: String },
    /// The stored collinear index disagrees with the stored edges.
    #[error("snapshot collinear index does not match its edges")]
    SnapshotCollinearMismatch,
    /// A tree node holds three collinear points.
    #[error("snapshot tree node {index} holds a degenerate triangle")]
    SnapshotDegenerateTriangle { index: usize },
    /// A fixed edge is not an edge of the mesh.
    #[error("snapshot fixes edge {edge}, which is not in the mesh")]
    SnapshotUnknownFixedEdge { edge: String },
    /// The operating system refused to start the funnel worker thread.
    #[error("failed to spawn funnel worker: {reason}")]
    WorkerSpawn { reason: String },
    /// The funnel worker thread is gone.
    #[error("funnel worker is disconnected")]
    WorkerDisconnected,
}
