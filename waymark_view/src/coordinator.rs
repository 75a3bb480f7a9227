// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-flight background decoding.
//!
//! At most one decode runs per [`LoadCoordinator`]. A request made while one
//! is in flight is dropped rather than queued, and an in-flight decode is
//! never cancelled. Results travel back over a channel and are only picked
//! up when the owning thread calls [`LoadCoordinator::try_complete`] or
//! [`LoadCoordinator::wait`], so the decoder never touches viewport state.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use kurbo::Rect;
use tracing::{debug, info};
use waymark_format::{LodPolicy, decode_records};
use waymark_geom::MapElement;

use crate::{DatasetSource, ViewError};

/// What to decode.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    /// Dataset name passed to the [`DatasetSource`].
    pub dataset: String,
    /// File-space query rectangle; `None` loads the whole dataset at the
    /// coarsest level of detail.
    pub bounds: Option<Rect>,
}

impl LoadRequest {
    /// Whether this is an unbounded load.
    pub fn is_full(&self) -> bool {
        self.bounds.is_none()
    }
}

/// A finished decode, handed back on the owning thread.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The request that produced this outcome.
    pub request: LoadRequest,
    /// Decoded elements in file space, or why there are none.
    pub result: Result<Vec<MapElement>, ViewError>,
}

/// Whether a request started a decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadDispatch {
    /// A decode is now in flight.
    Started,
    /// Another decode was already in flight; the request was discarded.
    Dropped,
}

type DecodeResult = Result<Vec<MapElement>, ViewError>;

enum LoadState {
    Idle,
    Loading {
        request: LoadRequest,
        results: Receiver<DecodeResult>,
    },
}

/// Runs dataset decodes off the owning thread, one at a time.
pub struct LoadCoordinator {
    source: Arc<dyn DatasetSource>,
    policy: LodPolicy,
    state: LoadState,
    dispatched: u64,
}

impl fmt::Debug for LoadCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let in_flight = match &self.state {
            LoadState::Idle => None,
            LoadState::Loading { request, .. } => Some(request),
        };
        f.debug_struct("LoadCoordinator")
            .field("policy", &self.policy)
            .field("in_flight", &in_flight)
            .field("dispatched", &self.dispatched)
            .finish_non_exhaustive()
    }
}

impl LoadCoordinator {
    /// Creates an idle coordinator reading from `source`.
    pub fn new(source: Arc<dyn DatasetSource>, policy: LodPolicy) -> Self {
        Self {
            source,
            policy,
            state: LoadState::Idle,
            dispatched: 0,
        }
    }

    /// Whether a decode is in flight or its result has not been collected.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// The in-flight request, if any.
    pub fn in_flight(&self) -> Option<&LoadRequest> {
        match &self.state {
            LoadState::Idle => None,
            LoadState::Loading { request, .. } => Some(request),
        }
    }

    /// Number of decodes started over the coordinator's lifetime.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Starts decoding `request` on a worker thread, unless one is in flight.
    ///
    /// Fails with [`ViewError::WorkerLost`] only if the thread cannot be
    /// spawned, in which case the coordinator stays idle.
    pub fn request(&mut self, request: LoadRequest) -> Result<LoadDispatch, ViewError> {
        if let LoadState::Loading { request: current, .. } = &self.state {
            debug!(
                dataset = %request.dataset,
                in_flight = %current.dataset,
                "load already in flight, dropping request"
            );
            return Ok(LoadDispatch::Dropped);
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let policy = self.policy.clone();
        let job = request.clone();
        thread::Builder::new()
            .name("waymark-decode".into())
            .spawn(move || {
                let result = decode(&*source, &job, &policy);
                // The coordinator may have been dropped; nobody is waiting then.
                let _ = tx.send(result);
            })
            .map_err(|_| ViewError::WorkerLost)?;

        info!(dataset = %request.dataset, bounds = ?request.bounds, "load dispatched");
        self.dispatched += 1;
        self.state = LoadState::Loading {
            request,
            results: rx,
        };
        Ok(LoadDispatch::Started)
    }

    /// Collects the in-flight result if it is ready, without blocking.
    ///
    /// Returns `None` when idle or still decoding. Collecting a result
    /// returns the coordinator to idle.
    pub fn try_complete(&mut self) -> Option<LoadOutcome> {
        let LoadState::Loading { results, .. } = &self.state else {
            return None;
        };
        let result = match results.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ViewError::WorkerLost),
        };
        self.finish(result)
    }

    /// Blocks until the in-flight result is ready and collects it.
    ///
    /// Returns `None` when idle.
    pub fn wait(&mut self) -> Option<LoadOutcome> {
        let LoadState::Loading { results, .. } = &self.state else {
            return None;
        };
        let result = results.recv().unwrap_or(Err(ViewError::WorkerLost));
        self.finish(result)
    }

    fn finish(&mut self, result: DecodeResult) -> Option<LoadOutcome> {
        match core::mem::replace(&mut self.state, LoadState::Idle) {
            LoadState::Idle => None,
            LoadState::Loading { request, .. } => Some(LoadOutcome { request, result }),
        }
    }
}

fn decode(source: &dyn DatasetSource, request: &LoadRequest, policy: &LodPolicy) -> DecodeResult {
    let reader = source.open(&request.dataset)?;
    Ok(decode_records(reader, request.bounds, policy)?)
}
