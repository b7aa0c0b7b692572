// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

use crate::client::DeviceRequest;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Step of a [`Plan`].
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Fire-and-forget device request.
    Call(DeviceRequest),
    /// Pause before issuing the following calls.
    ///
    /// This is the only ordering point of a plan: calls before the wait are issued before it,
    /// calls after the wait are issued after it. It doesn't wait for call completion!
    Wait(Duration),
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Call(request) => write!(f, "{request}"),
            Step::Wait(delay) => write!(f, "WAIT {}ms", delay.as_millis()),
        }
    }
}

/// Ordered device call sequence for one voice intent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn call(&mut self, request: DeviceRequest) -> &mut Self {
        self.steps.push(Step::Call(request));
        self
    }

    pub fn wait(&mut self, delay: Duration) -> &mut Self {
        self.steps.push(Step::Wait(delay));
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// All device requests of the plan in their issue order.
    pub fn requests(&self) -> impl Iterator<Item = &DeviceRequest> {
        self.steps.iter().filter_map(|s| match s {
            Step::Call(request) => Some(request),
            Step::Wait(_) => None,
        })
    }

    /// Sum of all wait steps.
    pub fn total_wait(&self) -> Duration {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Wait(delay) => *delay,
                Step::Call(_) => Duration::ZERO,
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<DeviceRequest> for Plan {
    fn from(request: DeviceRequest) -> Self {
        Self {
            steps: vec![Step::Call(request)],
        }
    }
}
