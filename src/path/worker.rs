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

//! Funnel computation on a dedicated thread.
//!
//! Requests go in over one channel and responses come back over another.
//! Nothing is shared: each message owns its data. Responses carry the key of
//! their request, and callers drop any response whose key is no longer
//! current.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NavmeshError;
use crate::geometry::point::Point;
use crate::path::funnel::{Portal, funnel};

/// Correlates a response with the request that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestKey(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunnelRequest {
    pub key: RequestKey,
    pub start: Point,
    pub end: Point,
    pub portals: Vec<Portal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunnelResponse {
    pub key: RequestKey,
    pub waypoints: Vec<Point>,
}

impl FunnelRequest {
    /// Runs the funnel in place; what the worker does with each request.
    pub fn solve(&self) -> FunnelResponse {
        FunnelResponse {
            key: self.key,
            waypoints: funnel(self.start, &self.portals, self.end),
        }
    }
}

/// Handle to a thread answering [`FunnelRequest`]s.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct FunnelWorker {
    requests: Option<Sender<FunnelRequest>>,
    responses: Receiver<FunnelResponse>,
    handle: Option<JoinHandle<()>>,
}

impl FunnelWorker {
    pub fn spawn() -> Result<Self, NavmeshError> {
        let (request_tx, request_rx) = mpsc::channel::<FunnelRequest>();
        let (response_tx, response_rx) = mpsc::channel::<FunnelResponse>();

        let handle = thread::Builder::new()
            .name("funnel-worker".into())
            .spawn(move || {
                for request in request_rx {
                    tracing::trace!(key = request.key.0, portals = request.portals.len(), "funnel request");
                    if response_tx.send(request.solve()).is_err() {
                        break;
                    }
                }
                tracing::debug!("funnel worker stopped");
            })
            .map_err(|e| NavmeshError::WorkerSpawn {
                reason: e.to_string(),
            })?;

        Ok(FunnelWorker {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    pub fn submit(&self, request: FunnelRequest) -> Result<(), NavmeshError> {
        let Some(requests) = &self.requests else {
            return Err(NavmeshError::WorkerDisconnected);
        };
        requests
            .send(request)
            .map_err(|_| NavmeshError::WorkerDisconnected)
    }

    /// Blocks until the next response arrives.
    pub fn recv(&self) -> Result<FunnelResponse, NavmeshError> {
        self.responses
            .recv()
            .map_err(|_| NavmeshError::WorkerDisconnected)
    }

    /// Next response if one is ready.
    pub fn try_recv(&self) -> Result<Option<FunnelResponse>, NavmeshError> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(NavmeshError::WorkerDisconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<FunnelResponse>, NavmeshError> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(NavmeshError::WorkerDisconnected),
        }
    }
}

impl Drop for FunnelWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("funnel worker panicked");
            }
        }
    }
}
