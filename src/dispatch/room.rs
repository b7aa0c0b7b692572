// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Room specific intent to device call mapping.
//!
//! The vocabulary depends on the room's device topology: with a receiver, all audio commands
//! are sent to the receiver, otherwise to the TV. Unmuting is only supported with a receiver.

use crate::client::{DeviceCommand, DeviceRequest, ReceiverPatch};
use crate::configuration::RoomSettings;
use crate::dispatch::input::InputResolver;
use crate::dispatch::intent::{
    Intent, SLOT_INPUT_TYPE, SLOT_LEVEL, SLOT_NUMBER, SLOT_SEARCH_TYPE, SLOT_SPACES, SlotLookup,
    optional_slot, parse_slot, required_slot,
};
use crate::dispatch::plan::Plan;
use crate::errors::ServiceError;
use std::time::Duration;

/// Default step count of directional navigation intents.
const DEF_SPACES: &str = "1";

pub struct Room {
    settings: RoomSettings,
    resolver: InputResolver,
    power_on_delay: Duration,
}

impl Room {
    pub fn new(settings: RoomSettings, power_on_delay: Duration) -> Self {
        let resolver = InputResolver::new(&settings.inputs, &settings.fallback);
        Self {
            settings,
            resolver,
            power_on_delay,
        }
    }

    pub fn id(&self) -> &str {
        &self.settings.id
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn app_id(&self) -> Option<&str> {
        self.settings.app_id.as_deref()
    }

    pub fn has_receiver(&self) -> bool {
        self.settings.receiver.is_some()
    }

    pub fn resolver(&self) -> &InputResolver {
        &self.resolver
    }

    /// Map an intent to the device call plan of this room.
    ///
    /// Returns an error without any device calls if the intent is not supported in this room, or
    /// if a required slot is missing or invalid.
    pub fn plan_intent(&self, intent: Intent, slots: &dyn SlotLookup) -> Result<Plan, ServiceError> {
        let tv = &self.settings.tv;
        let receiver = self.settings.receiver.as_ref().map(|r| &r.url);

        let plan = match intent {
            Intent::Off => {
                let mut plan = Plan::from(DeviceRequest::action(
                    tv,
                    DeviceCommand::without_value("PowerOff"),
                ));
                if let Some(receiver) = receiver {
                    plan.call(DeviceRequest::receiver(
                        receiver,
                        ReceiverPatch::default().power(false),
                    ));
                }
                plan
            }
            Intent::Mute => match receiver {
                Some(receiver) => {
                    DeviceRequest::receiver(receiver, ReceiverPatch::default().mute(true)).into()
                }
                None => DeviceRequest::action(tv, DeviceCommand::without_value("Mute")).into(),
            },
            Intent::Unmute => match receiver {
                Some(receiver) => {
                    DeviceRequest::receiver(receiver, ReceiverPatch::default().mute(false)).into()
                }
                None => return Err(ServiceError::UnsupportedIntent(intent.to_string())),
            },
            Intent::Volume => {
                let value = required_slot(slots, SLOT_LEVEL)?;
                let level: u16 = parse_slot(SLOT_LEVEL, value)?;
                match receiver {
                    // the receiver volume is in negative dB
                    Some(receiver) => DeviceRequest::receiver(
                        receiver,
                        ReceiverPatch::default().volume(-i32::from(level)),
                    )
                    .into(),
                    // the TV gets the spoken level unchanged
                    None => DeviceRequest::action(tv, DeviceCommand::new("Volume", value)).into(),
                }
            }
            Intent::Channel => {
                let number = required_slot(slots, SLOT_NUMBER)?;
                DeviceRequest::action(tv, DeviceCommand::new("Channel", number)).into()
            }
            Intent::ChannelUp => {
                DeviceRequest::action(tv, DeviceCommand::without_value("ChannelUp")).into()
            }
            Intent::ChannelDown => {
                DeviceRequest::action(tv, DeviceCommand::without_value("ChannelDown")).into()
            }
            Intent::Input => self.resolve_input(required_slot(slots, SLOT_INPUT_TYPE)?),
            Intent::Search => {
                let search_type = required_slot(slots, SLOT_SEARCH_TYPE)?;
                self.streaming_box(intent, search_type)?
            }
            intent if intent.is_directional() => {
                let spaces = optional_slot(slots, SLOT_SPACES).unwrap_or(DEF_SPACES);
                self.streaming_box(intent, spaces)?
            }
            intent => self.streaming_box(intent, "")?,
        };

        Ok(plan)
    }

    /// Build the input selection plan for a spoken input name.
    ///
    /// 1. receiver on with fallback volume and resolved input (rooms with receiver only)
    /// 2. start streaming box app, if the input is an app
    /// 3. power on TV
    /// 4. wait for the TV to power on
    /// 5. select TV input
    pub fn resolve_input(&self, text: &str) -> Plan {
        let sequence = self.resolver.resolve(text);
        let mut plan = Plan::default();

        if let (Some(receiver), Some(input)) = (&self.settings.receiver, sequence.receiver_input) {
            plan.call(DeviceRequest::receiver(
                &receiver.url,
                ReceiverPatch::default()
                    .power(true)
                    .volume(receiver.fallback_volume)
                    .input(input),
            ));
        }
        if let Some(app) = sequence.streaming_app {
            plan.call(DeviceRequest::action(
                &self.settings.streaming_box,
                DeviceCommand::new("input", app),
            ));
        }
        plan.call(DeviceRequest::action(
            &self.settings.tv,
            DeviceCommand::without_value("PowerOn"),
        ))
        .wait(self.power_on_delay)
        .call(DeviceRequest::action(
            &self.settings.tv,
            DeviceCommand::without_value(sequence.tv_input),
        ));

        plan
    }

    fn streaming_box(&self, intent: Intent, value: &str) -> Result<Plan, ServiceError> {
        let command = intent
            .streaming_box_command()
            .ok_or_else(|| ServiceError::UnsupportedIntent(intent.to_string()))?;
        Ok(DeviceRequest::action(
            &self.settings.streaming_box,
            DeviceCommand::new(command, value),
        )
        .into())
    }
}
