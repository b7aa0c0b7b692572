// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Voice intent dispatcher.
//!
//! Translates an intent of a room into a device call [`Plan`] and executes it in the background.
//! The speech response never depends on the outcome of the device calls: it is returned before
//! any device has been contacted.

mod executor;
mod input;
mod intent;
mod plan;
mod room;

pub use executor::{run_plan, spawn_plan};
pub use input::{InputResolver, InputSequence, normalize_input};
pub use intent::*;
pub use plan::{Plan, Step};
pub use room::Room;

use crate::client::DeviceRequestMsg;
use crate::configuration::Settings;
use crate::errors::ServiceError;
use actix::Recipient;
use log::{error, info, warn};
use std::collections::HashMap;

/// Speech response if the device calls have been started.
pub const SPEECH_PROCESSING: &str = "Processing Request.";

/// Speech response for an intent that can't be processed.
pub fn speech_apology(intent: &str) -> String {
    format!("I'm sorry I could not process your request {intent}.")
}

pub struct Dispatcher {
    rooms: HashMap<String, Room>,
    device_client: Recipient<DeviceRequestMsg>,
}

impl Dispatcher {
    pub fn new(settings: &Settings, device_client: Recipient<DeviceRequestMsg>) -> Self {
        let rooms = settings
            .rooms
            .iter()
            .map(|r| {
                (
                    r.id.clone(),
                    Room::new(r.clone(), settings.devices.power_on_delay),
                )
            })
            .collect();
        Self {
            rooms,
            device_client,
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Map an intent of a room to its device call plan without executing it.
    pub fn plan(
        &self,
        room_id: &str,
        intent_name: &str,
        slots: &dyn SlotLookup,
    ) -> Result<Plan, ServiceError> {
        let room = self
            .room(room_id)
            .ok_or_else(|| ServiceError::UnknownRoom(room_id.into()))?;
        let intent = intent_from_str(intent_name.trim())?;
        room.plan_intent(intent, slots)
    }

    /// Handle a voice intent and return the speech response.
    ///
    /// The device calls are started in a detached task. If the intent isn't supported by the
    /// room, or a required slot is missing or invalid, no device is called and an apology is
    /// returned.
    ///
    /// # Arguments
    ///
    /// * `id`: log prefix of the voice request
    /// * `room_id`: room identifier
    /// * `intent_name`: intent name, case-insensitive
    /// * `slots`: slot values of the intent
    ///
    /// returns: speech response, or [`ServiceError::UnknownRoom`]
    pub fn handle_intent(
        &self,
        id: &str,
        room_id: &str,
        intent_name: &str,
        slots: &dyn SlotLookup,
    ) -> Result<String, ServiceError> {
        let intent_name = intent_name.trim().to_uppercase();
        info!("[{id}] Intent passed: {intent_name}");

        match self.plan(room_id, &intent_name, slots) {
            Ok(plan) => {
                spawn_plan(id.to_string(), plan, self.device_client.clone());
                Ok(SPEECH_PROCESSING.to_string())
            }
            Err(e @ ServiceError::UnknownRoom(_)) => Err(e),
            Err(e) => {
                if e.is_intent_error() {
                    warn!("[{id}] Can't process intent {intent_name}: {e}");
                } else {
                    error!("[{id}] Error processing intent {intent_name}: {e}");
                }
                Ok(speech_apology(&intent_name))
            }
        }
    }
}
