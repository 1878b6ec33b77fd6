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

use navmesh2d::NavmeshError;
use navmesh2d::geometry::{Edge, Point, Triangle};
use navmesh2d::mesh::TriangleTree;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn root() -> Triangle {
    Triangle::new(p(0.0, 0.0), p(20.0, 0.0), p(10.0, 20.0))
}

#[test]
fn test_interior_split() {
    let mut tree = TriangleTree::new(root());
    let split = tree.split(p(10.0, 5.0));

    assert_eq!(split.superseded, vec![tree.root()]);
    assert_eq!(split.created.len(), 3);
    assert!(split.split_edge.is_none());
    assert!(!tree.is_live(tree.root()));
    assert_eq!(tree.triangles().len(), 3);
    assert_eq!(tree.len(), 4);

    let total: f64 = tree.triangles().iter().map(Triangle::area).sum();
    assert_eq!(total, root().area());
}

#[test]
fn test_point_location() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));

    assert_eq!(tree.find_containing_nodes(&p(10.0, 2.0)).len(), 1);
    // On the side between two of the new faces.
    assert_eq!(tree.find_containing_nodes(&p(6.0, 3.0)).len(), 2);
    // The new vertex is a corner of all three.
    assert_eq!(tree.find_containing_nodes(&p(10.0, 5.0)).len(), 3);
    assert!(tree.find_containing_nodes(&p(30.0, 30.0)).is_empty());
}

#[test]
fn test_split_on_shared_side() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));
    let split = tree.split(p(6.0, 3.0));

    assert_eq!(split.superseded.len(), 2);
    assert_eq!(split.created.len(), 4);
    assert_eq!(split.split_edge, Some(Edge::new(p(0.0, 0.0), p(10.0, 5.0))));
    assert_eq!(tree.triangles().len(), 5);
    assert!(
        tree.triangles()
            .iter()
            .all(|t| !t.has_edge(&Edge::new(p(0.0, 0.0), p(10.0, 5.0))))
    );
}

#[test]
fn test_split_on_outer_side() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));
    tree.split(p(6.0, 3.0));
    let split = tree.split(p(15.0, 0.0));

    assert_eq!(split.superseded.len(), 1);
    assert_eq!(split.created.len(), 2);
    assert_eq!(tree.triangles().len(), 6);
}

#[test]
#[should_panic]
fn test_split_outside_panics() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(-5.0, -5.0));
}

#[test]
#[should_panic]
fn test_split_on_existing_vertex_panics() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));
    tree.split(p(10.0, 5.0));
}

#[test]
fn test_find_node_across() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));

    let bottom = Triangle::new(p(10.0, 5.0), p(0.0, 0.0), p(20.0, 0.0));
    let left = Triangle::new(p(10.0, 5.0), p(0.0, 0.0), p(10.0, 20.0));

    let across = tree
        .find_node_across(&bottom, &Edge::new(p(0.0, 0.0), p(10.0, 5.0)))
        .expect("inner side has a neighbour");
    assert_eq!(*tree.triangle(across), left);

    assert!(
        tree.find_node_across(&bottom, &Edge::new(p(0.0, 0.0), p(20.0, 0.0)))
            .is_none()
    );
    assert_eq!(
        tree.find_nodes_with_edge(&Edge::new(p(10.0, 5.0), p(10.0, 20.0))).len(),
        2
    );
}

#[test]
fn test_segment_queries() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));

    // Horizontal line below the new vertex only passes through the bottom face.
    let low = Edge::new(p(4.0, 1.0), p(16.0, 1.0));
    assert_eq!(tree.find_nodes_crossing_edge(&low).len(), 1);

    // Runs along the side shared by the two upper faces and meets the bottom
    // face only at the new vertex.
    let high = Edge::new(p(10.0, 5.0), p(10.0, 15.0));
    assert_eq!(tree.find_nodes_crossing_edge(&high).len(), 0);
    assert_eq!(tree.find_nodes_touching_edge(&high).len(), 3);

    let across = Edge::new(p(2.0, 3.0), p(18.0, 3.0));
    assert_eq!(tree.find_nodes_crossing_edge(&across).len(), 3);
}

#[test]
fn test_replace_and_retire() {
    let mut tree = TriangleTree::new(root());
    let split = tree.split(p(10.0, 5.0));

    let bottom = split
        .created
        .iter()
        .copied()
        .find(|id| tree.triangle(*id).has_edge(&Edge::new(p(0.0, 0.0), p(20.0, 0.0))))
        .expect("bottom face exists");
    let halves = vec![
        Triangle::new(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)),
        Triangle::new(p(10.0, 0.0), p(20.0, 0.0), p(10.0, 5.0)),
    ];
    let created = tree.replace(&[bottom], halves);
    assert_eq!(created.len(), 2);
    assert_eq!(tree.node(bottom).children(), created.as_slice());
    assert_eq!(tree.triangles().len(), 4);
    assert_eq!(tree.find_containing_nodes(&p(5.0, 1.0)), vec![created[0]]);

    tree.retire(&[created[0]]);
    assert_eq!(tree.triangles().len(), 3);
    assert!(tree.find_containing_nodes(&p(5.0, 1.0)).is_empty());
}

#[test]
fn test_snapshot_round_trip() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));
    tree.split(p(6.0, 3.0));

    let snapshot = tree.to_snapshot();
    let restored = TriangleTree::from_snapshot(&snapshot).expect("valid snapshot");
    assert_eq!(restored.to_snapshot(), snapshot);
    assert_eq!(restored.triangles(), tree.triangles());
}

#[test]
fn test_snapshot_rejects_bad_nodes() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));

    let mut snapshot = tree.to_snapshot();
    snapshot.nodes[0].children.push(99);
    assert_eq!(
        TriangleTree::from_snapshot(&snapshot).err(),
        Some(NavmeshError::SnapshotUnknownNode { index: 99, len: 4 })
    );

    let mut snapshot = tree.to_snapshot();
    snapshot.nodes[2].triangle = Triangle::new_unchecked(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0));
    assert_eq!(
        TriangleTree::from_snapshot(&snapshot).err(),
        Some(NavmeshError::SnapshotDegenerateTriangle { index: 2 })
    );
}

#[test]
fn test_crossing_query_after_flip() {
    let mut tree = TriangleTree::new(Triangle::new(p(0.0, 0.0), p(40.0, 0.0), p(0.0, 40.0)));
    let quarters = tree.replace(
        &[tree.root()],
        vec![
            Triangle::new(p(0.0, 0.0), p(20.0, 0.0), p(0.0, 20.0)),
            Triangle::new(p(20.0, 0.0), p(40.0, 0.0), p(20.0, 20.0)),
            Triangle::new(p(0.0, 20.0), p(20.0, 20.0), p(0.0, 40.0)),
            Triangle::new(p(20.0, 0.0), p(20.0, 20.0), p(0.0, 20.0)),
        ],
    );

    // Flip the diagonal of the lower-left square.
    let old_diagonal = Edge::new(p(20.0, 0.0), p(0.0, 20.0));
    let flipped = tree.replace(
        &[quarters[0], quarters[3]],
        vec![
            Triangle::new(p(0.0, 0.0), p(20.0, 0.0), p(20.0, 20.0)),
            Triangle::new(p(0.0, 0.0), p(20.0, 20.0), p(0.0, 20.0)),
        ],
    );

    assert!(tree.find_nodes_with_edge(&old_diagonal).is_empty());
    assert_eq!(
        tree.find_nodes_with_edge(&Edge::new(p(0.0, 0.0), p(20.0, 20.0))),
        flipped
    );
    assert_eq!(tree.find_nodes_crossing_edge(&old_diagonal), flipped);
    assert_eq!(tree.find_nodes_touching_edge(&old_diagonal).len(), 4);
}

#[test]
fn test_faces_around_vertex() {
    let mut tree = TriangleTree::new(root());
    tree.split(p(10.0, 5.0));
    assert_eq!(tree.faces_around(&p(10.0, 5.0)).len(), 3);
    assert_eq!(tree.faces_around(&p(0.0, 0.0)).len(), 2);

    tree.split(p(6.0, 3.0));
    assert_eq!(tree.faces_around(&p(6.0, 3.0)).len(), 4);
    assert_eq!(tree.faces_around(&p(10.0, 5.0)).len(), 3);
    assert_eq!(tree.faces_around(&p(0.0, 0.0)).len(), 2);
    assert!(tree.faces_around(&p(3.0, 3.0)).is_empty());

    let restored = TriangleTree::from_snapshot(&tree.to_snapshot()).expect("valid snapshot");
    assert_eq!(restored.faces_around(&p(6.0, 3.0)), tree.faces_around(&p(6.0, 3.0)));
}
