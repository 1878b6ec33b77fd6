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

use std::time::Duration;

use navmesh2d::geometry::{Point, Triangle};
use navmesh2d::path::{FunnelRequest, FunnelWorker, Portal, RequestKey, funnel, portals_between};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn corridor_portals(flip: bool) -> Vec<Portal> {
    (1..10)
        .map(|i| {
            let x = i as f64 * 10.0;
            if flip {
                Portal::new(p(x, 0.0), p(x, 10.0))
            } else {
                Portal::new(p(x, 10.0), p(x, 0.0))
            }
        })
        .collect()
}

#[test]
fn test_straight_corridor() {
    for flip in [false, true] {
        let path = funnel(p(0.0, 5.0), &corridor_portals(flip), p(100.0, 5.0));
        assert_eq!(path, vec![p(0.0, 5.0), p(100.0, 5.0)]);
    }
}

#[test]
fn test_bend_at_corner() {
    let portals = [
        Portal::new(p(10.0, 10.0), p(10.0, 0.0)),
        Portal::new(p(10.0, 10.0), p(20.0, 10.0)),
    ];
    let path = funnel(p(0.0, 5.0), &portals, p(15.0, 30.0));
    assert_eq!(path, vec![p(0.0, 5.0), p(10.0, 10.0), p(15.0, 30.0)]);
}

#[test]
fn test_waypoints_are_portal_endpoints() {
    // A zigzag corridor forcing bends on both sides.
    let portals = [
        Portal::new(p(10.0, 10.0), p(10.0, 0.0)),
        Portal::new(p(10.0, 10.0), p(20.0, 10.0)),
        Portal::new(p(10.0, 20.0), p(20.0, 20.0)),
        Portal::new(p(20.0, 30.0), p(20.0, 20.0)),
        Portal::new(p(30.0, 30.0), p(30.0, 20.0)),
    ];
    let start = p(0.0, 5.0);
    let end = p(40.0, 25.0);
    let path = funnel(start, &portals, end);

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    for w in &path[1..path.len() - 1] {
        assert!(portals.iter().any(|portal| portal.left == *w || portal.right == *w));
    }
    for pair in path.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_degenerate_portals_are_ignored_in_output() {
    let portals = [
        Portal::point(p(5.0, 5.0)),
        Portal::new(p(10.0, 10.0), p(10.0, 0.0)),
    ];
    let path = funnel(p(5.0, 5.0), &portals, p(20.0, 5.0));
    assert_eq!(path, vec![p(5.0, 5.0), p(20.0, 5.0)]);
    assert!(portals[0].is_degenerate());
}

#[test]
fn test_funnel_is_idempotent_on_its_output() {
    let portals = [
        Portal::new(p(10.0, 10.0), p(10.0, 0.0)),
        Portal::new(p(10.0, 10.0), p(20.0, 10.0)),
    ];
    let path = funnel(p(0.0, 5.0), &portals, p(15.0, 30.0));

    let through: Vec<Portal> = path[1..path.len() - 1].iter().map(|w| Portal::point(*w)).collect();
    let again = funnel(path[0], &through, path[path.len() - 1]);
    assert_eq!(again, path);
}

#[test]
fn test_portals_between_faces() {
    let a = Triangle::new(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
    let b = Triangle::new(p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0));
    let portals = portals_between(&[a, b]);

    // Seen from (0, 0), (0, 10) is on the left.
    assert_eq!(portals, vec![Portal::new(p(0.0, 10.0), p(10.0, 0.0))]);
    assert!(portals_between(&[Triangle::new(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0))]).is_empty());
}

#[test]
#[should_panic]
fn test_portals_between_disjoint_faces_panics() {
    let a = Triangle::new(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
    let b = Triangle::new(p(50.0, 50.0), p(60.0, 50.0), p(50.0, 60.0));
    portals_between(&[a, b]);
}

#[test]
fn test_worker_answers_by_key() {
    let worker = FunnelWorker::spawn().expect("worker thread");
    let straight = FunnelRequest {
        key: RequestKey(1),
        start: p(0.0, 5.0),
        end: p(100.0, 5.0),
        portals: corridor_portals(false),
    };
    let bent = FunnelRequest {
        key: RequestKey(2),
        start: p(0.0, 5.0),
        end: p(15.0, 30.0),
        portals: vec![
            Portal::new(p(10.0, 10.0), p(10.0, 0.0)),
            Portal::new(p(10.0, 10.0), p(20.0, 10.0)),
        ],
    };
    worker.submit(straight.clone()).expect("submit");
    worker.submit(bent.clone()).expect("submit");

    let mut responses = vec![
        worker.recv().expect("first response"),
        worker.recv().expect("second response"),
    ];
    responses.sort_by_key(|r| r.key);
    assert_eq!(responses[0], straight.solve());
    assert_eq!(responses[1].key, RequestKey(2));
    assert_eq!(responses[1].waypoints, vec![p(0.0, 5.0), p(10.0, 10.0), p(15.0, 30.0)]);

    assert_eq!(worker.try_recv(), Ok(None));
    assert_eq!(worker.recv_timeout(Duration::from_millis(10)), Ok(None));
}

#[test]
fn test_request_round_trips_through_json() {
    let request = FunnelRequest {
        key: RequestKey(7),
        start: p(0.0, 5.0),
        end: p(100.0, 5.0),
        portals: corridor_portals(true),
    };
    let json = serde_json::to_string(&request).expect("serialize");
    let back: FunnelRequest = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, request);
    assert_eq!(back.solve().waypoints, vec![p(0.0, 5.0), p(100.0, 5.0)]);
}
