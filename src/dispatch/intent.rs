// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Voice intents and their slots.

use crate::errors::ServiceError;
use std::collections::HashMap;
use strum::{EnumString, VariantNames};

pub const SLOT_LEVEL: &str = "Level";
pub const SLOT_NUMBER: &str = "Number";
pub const SLOT_INPUT_TYPE: &str = "InputType";
pub const SLOT_SPACES: &str = "Spaces";
pub const SLOT_SEARCH_TYPE: &str = "SearchType";

/// Known intent names. Parsing ignores ASCII case.
///
/// Whether an intent is supported depends on the room, see [`Room`](super::Room).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, VariantNames, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Intent {
    Off,
    Mute,
    Unmute,
    Volume,
    Channel,
    ChannelUp,
    ChannelDown,
    Input,
    Home,
    Back,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Select,
    Play,
    Forward,
    Reverse,
    Search,
}

impl Intent {
    /// Streaming box command of a navigation or playback intent.
    pub fn streaming_box_command(&self) -> Option<&'static str> {
        let cmd = match self {
            Intent::Home => "home",
            Intent::Back => "back",
            Intent::Up => "up",
            Intent::Down => "down",
            Intent::Left => "left",
            Intent::Right => "right",
            Intent::Enter => "enter",
            Intent::Select => "select",
            // the streaming box controller starts playback with `right`
            Intent::Play => "right",
            Intent::Forward => "forward",
            Intent::Reverse => "reverse",
            Intent::Search => "search",
            _ => return None,
        };
        Some(cmd)
    }

    /// Directional navigation intents accept an optional step count.
    pub fn is_directional(&self) -> bool {
        matches!(self, Intent::Up | Intent::Down | Intent::Left | Intent::Right)
    }
}

/// Access to the slot values of an intent request.
pub trait SlotLookup {
    /// Returns the raw slot value, `None` if the slot is not present or has no value.
    fn slot_value(&self, name: &str) -> Option<&str>;
}

impl SlotLookup for HashMap<String, String> {
    fn slot_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Intent without slots, e.g. from a launch request.
pub struct NoSlots;

impl SlotLookup for NoSlots {
    fn slot_value(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Get the trimmed value of a required slot.
///
/// A [`ServiceError::MissingSlot`] error is returned if the slot is not set or empty.
pub fn required_slot<'a>(slots: &'a dyn SlotLookup, name: &str) -> Result<&'a str, ServiceError> {
    optional_slot(slots, name).ok_or_else(|| ServiceError::MissingSlot(name.into()))
}

/// Get the trimmed value of an optional slot. Empty values are treated as not set.
pub fn optional_slot<'a>(slots: &'a dyn SlotLookup, name: &str) -> Option<&'a str> {
    slots
        .slot_value(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse a numeric slot value.
pub fn parse_slot<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ServiceError> {
    value.parse().map_err(|_| ServiceError::InvalidSlot {
        slot: name.into(),
        value: value.into(),
    })
}

pub fn intent_from_str(name: &str) -> Result<Intent, ServiceError> {
    name.parse().map_err(|_| {
        ServiceError::UnsupportedIntent(format!(
            "{name}. Valid intents: {}",
            Intent::VARIANTS.join(",")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("OFF", Intent::Off)]
    #[case("channelup", Intent::ChannelUp)]
    #[case("ChannelDown", Intent::ChannelDown)]
    #[case("search", Intent::Search)]
    fn intent_names_are_case_insensitive(#[case] name: &str, #[case] expected: Intent) {
        assert_eq!(Ok(expected), intent_from_str(name));
    }

    #[rstest]
    #[case("FOO")]
    #[case("")]
    #[case("CHANNEL UP")]
    fn unknown_intent_returns_unsupported_intent(#[case] name: &str) {
        assert!(matches!(
            intent_from_str(name),
            Err(ServiceError::UnsupportedIntent(_))
        ));
    }

    #[test]
    fn intent_display_is_uppercase() {
        assert_eq!("CHANNELUP", Intent::ChannelUp.to_string());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn empty_required_slot_returns_missing_slot(#[case] value: Option<&str>) {
        let mut slots = HashMap::new();
        if let Some(value) = value {
            slots.insert(SLOT_LEVEL.to_string(), value.to_string());
        }
        assert_eq!(
            Err(ServiceError::MissingSlot(SLOT_LEVEL.into())),
            required_slot(&slots, SLOT_LEVEL)
        );
    }

    #[test]
    fn required_slot_value_is_trimmed() {
        let slots = HashMap::from([(SLOT_NUMBER.to_string(), " 42 ".to_string())]);
        assert_eq!(Ok("42"), required_slot(&slots, SLOT_NUMBER));
    }

    #[test]
    fn invalid_number_returns_invalid_slot() {
        let result: Result<u16, _> = parse_slot(SLOT_LEVEL, "loud");
        assert_eq!(
            Err(ServiceError::InvalidSlot {
                slot: SLOT_LEVEL.into(),
                value: "loud".into()
            }),
            result
        );
    }
}
