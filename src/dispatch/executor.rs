// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Detached plan execution.

use crate::client::DeviceRequestMsg;
use crate::dispatch::plan::{Plan, Step};
use actix::Recipient;
use actix_web::rt::time::sleep;
use log::debug;

/// Execute a plan in a detached task. Returns immediately.
///
/// Device requests are fire-and-forget: their outcome is only logged by the device client.
pub fn spawn_plan(id: String, plan: Plan, device_client: Recipient<DeviceRequestMsg>) {
    if plan.is_empty() {
        return;
    }
    actix_web::rt::spawn(run_plan(id, plan, device_client));
}

/// Issue all plan steps in order.
///
/// A call step only hands the request to the device client and doesn't wait for the response.
/// A wait step delays all following call steps.
pub async fn run_plan(id: String, plan: Plan, device_client: Recipient<DeviceRequestMsg>) {
    for step in plan.into_steps() {
        match step {
            Step::Call(request) => device_client.do_send(DeviceRequestMsg {
                id: id.clone(),
                request,
            }),
            Step::Wait(delay) => {
                debug!("[{id}] Waiting {}ms for device power on", delay.as_millis());
                sleep(delay).await;
            }
        }
    }
}
