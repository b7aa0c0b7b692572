// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Device client mock for tests: records all requests instead of sending them.

use crate::client::{DeviceRequest, DeviceRequestMsg};
use crate::errors::ServiceError;
use actix::{Actor, Context, Handler};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
pub struct RecordedCalls(Arc<Mutex<Vec<(Instant, DeviceRequest)>>>);

impl RecordedCalls {
    pub fn requests(&self) -> Vec<DeviceRequest> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Time between two recorded requests.
    pub fn elapsed_between(&self, first: usize, second: usize) -> Option<Duration> {
        let calls = self.0.lock().unwrap();
        let first = calls.get(first)?.0;
        let second = calls.get(second)?.0;
        Some(second.duration_since(first))
    }
}

#[derive(Default)]
pub struct RecordingClient {
    calls: RecordedCalls,
}

impl RecordingClient {
    pub fn calls(&self) -> RecordedCalls {
        self.calls.clone()
    }
}

impl Actor for RecordingClient {
    type Context = Context<Self>;
}

impl Handler<DeviceRequestMsg> for RecordingClient {
    type Result = Result<u16, ServiceError>;

    fn handle(&mut self, msg: DeviceRequestMsg, _ctx: &mut Self::Context) -> Self::Result {
        self.calls
            .0
            .lock()
            .unwrap()
            .push((Instant::now(), msg.request));
        Ok(200)
    }
}
