// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Device controller request payloads.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use url::Url;

/// Action request for a TV or streaming box controller.
///
/// Serialized as `{"command": "<name>"}` or `{"command": "<name>", "value": "<value>"}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeviceCommand {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl DeviceCommand {
    /// Create a new command. An empty `value` is omitted.
    pub fn new(command: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            command: command.into(),
            value: if value.is_empty() { None } else { Some(value) },
        }
    }

    pub fn without_value(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            value: None,
        }
    }
}

/// Partial receiver state update. Only the set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReceiverPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl ReceiverPatch {
    pub fn power(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    pub fn volume(mut self, volume: i32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = Some(mute);
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// A single downstream HTTP call.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceRequest {
    /// `POST` a [`DeviceCommand`] to a TV or streaming box.
    Action {
        endpoint: Url,
        command: DeviceCommand,
    },
    /// `PUT` a [`ReceiverPatch`] to a receiver.
    Receiver { endpoint: Url, patch: ReceiverPatch },
}

impl DeviceRequest {
    pub fn action(endpoint: &Url, command: DeviceCommand) -> Self {
        DeviceRequest::Action {
            endpoint: endpoint.clone(),
            command,
        }
    }

    pub fn receiver(endpoint: &Url, patch: ReceiverPatch) -> Self {
        DeviceRequest::Receiver {
            endpoint: endpoint.clone(),
            patch,
        }
    }

    pub fn endpoint(&self) -> &Url {
        match self {
            DeviceRequest::Action { endpoint, .. } | DeviceRequest::Receiver { endpoint, .. } => {
                endpoint
            }
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            DeviceRequest::Action { .. } => "POST",
            DeviceRequest::Receiver { .. } => "PUT",
        }
    }

    /// JSON request body.
    pub fn body(&self) -> Result<String, serde_json::Error> {
        match self {
            DeviceRequest::Action { command, .. } => serde_json::to_string(command),
            DeviceRequest::Receiver { patch, .. } => serde_json::to_string(patch),
        }
    }
}

impl Display for DeviceRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let body = self.body().map_err(|_| std::fmt::Error)?;
        write!(f, "{} {} {}", self.method(), self.endpoint(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PowerOn", "", r#"{"command":"PowerOn"}"#)]
    #[case("up", "5", r#"{"command":"up","value":"5"}"#)]
    #[case("input", "Prime Video", r#"{"command":"input","value":"Prime Video"}"#)]
    fn device_command_json(#[case] command: &str, #[case] value: &str, #[case] expected: &str) {
        let json = serde_json::to_string(&DeviceCommand::new(command, value)).unwrap();
        assert_eq!(expected, json);
    }

    #[test]
    fn receiver_patch_only_contains_set_fields() {
        let patch = ReceiverPatch::default().mute(true);
        assert_eq!(r#"{"mute":true}"#, serde_json::to_string(&patch).unwrap());

        let patch = ReceiverPatch::default().power(true).volume(-30).input("HDMI2");
        assert_eq!(
            r#"{"on":true,"volume":-30,"input":"HDMI2"}"#,
            serde_json::to_string(&patch).unwrap()
        );
    }

    #[test]
    fn device_request_display_contains_method_and_body() {
        let url = Url::parse("http://localhost:8081/receiver/").unwrap();
        let request = DeviceRequest::receiver(&url, ReceiverPatch::default().power(false));
        assert_eq!(
            r#"PUT http://localhost:8081/receiver/ {"on":false}"#,
            request.to_string()
        );
    }
}
