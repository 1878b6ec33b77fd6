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

//! Navigation meshes over 2D polygonal maps.
//!
//! A [`mesh::TriangleGraph`] keeps a constrained Delaunay triangulation of
//! the walkable area, with walls as fixed edges. Paths are found by A* over
//! the dual graph of triangle centers ([`path::search`]) and smoothed by the
//! funnel algorithm ([`path::funnel`]). All orientation and in-circle
//! decisions are made with exact rational arithmetic.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod kernel;
pub mod mesh;
pub mod numeric;
pub mod path;
pub mod store;

pub use config::NavmeshConfig;
pub use error::NavmeshError;
pub use geometry::{Edge, Point, Polypoint, Triangle, Vector};
pub use mesh::{MeshState, MeshUpdate, TriangleGraph, TriangleGraphSnapshot};
pub use path::{Portal, find_path, funnel};
