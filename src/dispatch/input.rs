// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Input selection: resolves a spoken input name with the room's alias table.

use crate::configuration::{InputFallback, InputTarget};
use log::warn;
use std::collections::HashMap;

/// Canonical input sequence of a resolved input name.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSequence {
    /// Receiver input, if the room has a receiver.
    pub receiver_input: Option<String>,
    /// App to start on the streaming box.
    pub streaming_app: Option<String>,
    /// TV input selection command, sent after powering on the TV.
    pub tv_input: String,
}

/// Normalize a spoken input name for alias lookup: uppercase without whitespace.
pub fn normalize_input(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Immutable alias lookup table of a room, built once at startup.
#[derive(Debug)]
pub struct InputResolver {
    targets: Vec<InputTarget>,
    /// normalized alias -> index in `targets`
    aliases: HashMap<String, usize>,
    fallback: InputFallback,
}

impl InputResolver {
    pub fn new(targets: &[InputTarget], fallback: &InputFallback) -> Self {
        let mut aliases: HashMap<String, usize> = HashMap::new();
        for (index, target) in targets.iter().enumerate() {
            for alias in &target.aliases {
                let key = normalize_input(alias);
                if key.is_empty() {
                    continue;
                }
                // first definition wins
                if let Some(existing) = aliases.get(&key) {
                    if *existing != index {
                        warn!(
                            "Alias '{alias}' of input {} already used for input {}, ignoring it",
                            target.name, targets[*existing].name
                        );
                    }
                    continue;
                }
                aliases.insert(key, index);
            }
        }

        Self {
            targets: targets.to_vec(),
            aliases,
            fallback: fallback.clone(),
        }
    }

    /// Find the input target for a spoken input name.
    pub fn lookup(&self, text: &str) -> Option<&InputTarget> {
        self.aliases
            .get(&normalize_input(text))
            .map(|index| &self.targets[*index])
    }

    /// Resolve a spoken input name to its input sequence.
    ///
    /// The lookup is total: an unknown name falls back to the room's default inputs, with the
    /// spoken text as streaming box app name.
    pub fn resolve(&self, text: &str) -> InputSequence {
        match self.lookup(text) {
            Some(target) => InputSequence {
                receiver_input: target.receiver_input.clone(),
                streaming_app: target.streaming_app.clone(),
                tv_input: target.tv_input.clone(),
            },
            None => InputSequence {
                receiver_input: self.fallback.receiver_input.clone(),
                streaming_app: Some(text.trim().to_string()),
                tv_input: self.fallback.tv_input.clone(),
            },
        }
    }

    pub fn targets(&self) -> &[InputTarget] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Settings;
    use rstest::rstest;

    fn resolver(room: usize) -> InputResolver {
        let settings = Settings::default();
        let room = &settings.rooms[room];
        InputResolver::new(&room.inputs, &room.fallback)
    }

    #[rstest]
    #[case("ps4", "PS4")]
    #[case("Retro Pie", "RETROPIE")]
    #[case(" p.s. 4 ", "P.S.4")]
    #[case("we'll", "WE'LL")]
    fn input_names_are_normalized(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(expected, normalize_input(text));
    }

    #[test]
    fn all_aliases_of_a_target_resolve_to_the_same_sequence() {
        for room in [0, 1] {
            let resolver = resolver(room);
            for target in resolver.targets() {
                let expected = resolver.resolve(&target.aliases[0]);
                for alias in &target.aliases {
                    assert_eq!(
                        expected,
                        resolver.resolve(alias),
                        "alias {alias} of {}",
                        target.name
                    );
                    assert_eq!(
                        expected,
                        resolver.resolve(&alias.to_lowercase()),
                        "lowercase alias {alias} of {}",
                        target.name
                    );
                }
            }
        }
    }

    #[rstest]
    #[case("ps4", Some("HDMI2"), None, "HDMI1")]
    #[case("four", Some("HDMI2"), None, "HDMI1")]
    #[case("retro pi", Some("AV1"), None, "HDMI2")]
    #[case("tv", Some("AV1"), None, "InputTV")]
    #[case("xbox", Some("V-AUX"), None, "HDMI1")]
    #[case("amazon", Some("HDMI1"), Some("Prime Video"), "HDMI1")]
    #[case("dc universe", Some("HDMI1"), Some("DC Universe"), "HDMI1")]
    fn family_room_inputs(
        #[case] text: &str,
        #[case] receiver_input: Option<&str>,
        #[case] streaming_app: Option<&str>,
        #[case] tv_input: &str,
    ) {
        let sequence = resolver(0).resolve(text);
        assert_eq!(receiver_input, sequence.receiver_input.as_deref());
        assert_eq!(streaming_app, sequence.streaming_app.as_deref());
        assert_eq!(tv_input, sequence.tv_input);
    }

    #[rstest]
    #[case("two", None, "InputAV1")]
    #[case("wee", None, "InputComponent1")]
    #[case("switch", None, "HDMI2")]
    #[case("net flix", Some("Netflix"), "HDMI1")]
    fn master_bedroom_inputs(
        #[case] text: &str,
        #[case] streaming_app: Option<&str>,
        #[case] tv_input: &str,
    ) {
        let sequence = resolver(1).resolve(text);
        assert_eq!(None, sequence.receiver_input);
        assert_eq!(streaming_app, sequence.streaming_app.as_deref());
        assert_eq!(tv_input, sequence.tv_input);
    }

    #[test]
    fn unknown_input_falls_back_to_streaming_app() {
        let sequence = resolver(0).resolve(" Disney Plus ");
        assert_eq!(
            InputSequence {
                receiver_input: Some("HDMI1".into()),
                streaming_app: Some("Disney Plus".into()),
                tv_input: "HDMI1".into(),
            },
            sequence
        );
    }

    #[test]
    fn duplicate_alias_keeps_first_target() {
        let targets = vec![
            InputTarget {
                name: "first".into(),
                aliases: vec!["WE".into()],
                receiver_input: None,
                streaming_app: None,
                tv_input: "HDMI1".into(),
            },
            InputTarget {
                name: "second".into(),
                aliases: vec!["we".into(), "SECOND".into()],
                receiver_input: None,
                streaming_app: None,
                tv_input: "HDMI2".into(),
            },
        ];
        let fallback = InputFallback {
            receiver_input: None,
            tv_input: "HDMI1".into(),
        };
        let resolver = InputResolver::new(&targets, &fallback);

        assert_eq!(Some("first"), resolver.lookup("we").map(|t| t.name.as_str()));
        assert_eq!(
            Some("second"),
            resolver.lookup("second").map(|t| t.name.as_str())
        );
    }
}
