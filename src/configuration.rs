// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Configuration file handling.

mod defaults;

use config::Config;
use log::{info, warn};
use serde_with::{DurationMilliSeconds, DurationSeconds, serde_as};
use std::collections::HashSet;
use std::env;
use std::time::Duration;
use url::Url;

/// Default configuration file.
pub const DEF_CONFIG_FILE: &str = "configuration.yaml";

/// Environment variable prefix to override configuration settings.
pub const ENV_PREFIX: &str = "VAD";

pub const DEF_REQUEST_TIMEOUT_SEC: u64 = 15;
pub const DEF_POWER_ON_DELAY_MS: u64 = 500;

#[derive(serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub integration: IntegrationSettings,
    pub devices: DeviceSettings,
    pub rooms: Vec<RoomSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            integration: Default::default(),
            devices: Default::default(),
            rooms: vec![defaults::family_room(), defaults::master_bedroom()],
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
pub struct IntegrationSettings {
    pub interface: String,
    pub http: WebServerSettings,
    /// Max size of a skill request payload in KB.
    pub json_limit_kb: usize,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            interface: "0.0.0.0".to_string(),
            http: WebServerSettings { port: 8000 },
            json_limit_kb: 16,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
pub struct WebServerSettings {
    pub port: u16,
}

/// Device controller communication settings, shared by all rooms.
#[serde_as]
#[derive(Clone, Copy, Debug, serde::Deserialize, serde::Serialize)]
pub struct DeviceSettings {
    /// Total time for a device request, including connection setup.
    #[serde_as(as = "DurationSeconds")]
    #[serde(rename = "request_timeout_sec")]
    pub request_timeout: Duration,
    /// Pause between powering on the TV and selecting its input.
    ///
    /// There's no readiness signal from the TV, the delay is assumed to be long enough.
    #[serde_as(as = "DurationMilliSeconds")]
    #[serde(rename = "power_on_delay_ms")]
    pub power_on_delay: Duration,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEF_REQUEST_TIMEOUT_SEC),
            power_on_delay: Duration::from_millis(DEF_POWER_ON_DELAY_MS),
        }
    }
}

/// Static room profile: device endpoints and input alias table.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RoomSettings {
    /// Room identifier, used in the skill endpoint path `/echo/{id}`.
    pub id: String,
    pub name: String,
    /// Environment variable holding the voice platform application identifier.
    #[serde(default)]
    pub app_id_env: Option<String>,
    /// Expected voice platform application identifier. All requests are accepted if not set.
    #[serde(default)]
    pub app_id: Option<String>,
    /// TV action endpoint.
    pub tv: Url,
    /// Streaming box action endpoint.
    pub streaming_box: Url,
    /// AV receiver. Volume and mute are sent to the TV if the room doesn't have a receiver.
    #[serde(default)]
    pub receiver: Option<ReceiverSettings>,
    pub inputs: Vec<InputTarget>,
    pub fallback: InputFallback,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ReceiverSettings {
    pub url: Url,
    /// Volume set when switching inputs.
    pub fallback_volume: i32,
}

/// Canonical input target with all accepted aliases.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InputTarget {
    pub name: String,
    pub aliases: Vec<String>,
    /// Receiver input, only used in rooms with a receiver.
    #[serde(default)]
    pub receiver_input: Option<String>,
    /// App to launch on the streaming box.
    #[serde(default)]
    pub streaming_app: Option<String>,
    /// TV input selection command.
    pub tv_input: String,
}

/// Input sequence for unknown input names. The input text is used as streaming box app.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InputFallback {
    #[serde(default)]
    pub receiver_input: Option<String>,
    pub tv_input: String,
}

impl RoomSettings {
    /// Take the application identifier from the configured environment variable if it is set.
    fn apply_app_id_env(&mut self) {
        if let Some(key) = self.app_id_env.as_ref()
            && let Ok(value) = env::var(key)
            && !value.trim().is_empty()
        {
            info!("[{}] Using application id from {key}", self.id);
            self.app_id = Some(value.trim().to_string());
        }
    }
}

/// Load the configuration settings.
///
/// The application provides default values which can be overriden in the following order:
/// 1. Configuration settings in the yaml or json configuration file specified in `filename`
/// 2. Environment variables with prefix `VAD_` (works only for cfg keys not containing a `_`!)
///
/// The application identifier of a room is finally taken from the room's `app_id_env` variable.
pub fn get_configuration(filename: Option<&str>) -> Result<Settings, config::ConfigError> {
    let mut config = Config::builder().add_source(Config::try_from(&Settings::default())?);
    if let Some(filename) = filename {
        info!("Loading configuration file: {filename}");
        config = config.add_source(config::File::with_name(filename));
    }

    // E.g. `VAD_INTEGRATION_INTERFACE=127.0.0.1` would set the `integration.interface` key
    let config = config
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("_"))
        .build()?;

    let mut settings: Settings = config.try_deserialize()?;
    for room in settings.rooms.iter_mut() {
        room.apply_app_id_env();
    }

    check_cfg_values(settings)
}

fn check_cfg_values(mut settings: Settings) -> Result<Settings, config::ConfigError> {
    if settings.devices.request_timeout.as_secs() < 1 {
        warn!("Invalid device request timeout, using default.");
        settings.devices.request_timeout = Duration::from_secs(DEF_REQUEST_TIMEOUT_SEC);
    }
    if settings.devices.power_on_delay > settings.devices.request_timeout {
        warn!("Power on delay is longer than the request timeout, using default.");
        settings.devices.power_on_delay = Duration::from_millis(DEF_POWER_ON_DELAY_MS);
    }

    if settings.rooms.is_empty() {
        return Err(config::ConfigError::Message(
            "at least one room must be configured".into(),
        ));
    }

    let mut ids = HashSet::new();
    for room in &settings.rooms {
        if room.id.is_empty() || !ids.insert(room.id.as_str()) {
            return Err(config::ConfigError::Message(format!(
                "empty or duplicate room id: '{}'",
                room.id
            )));
        }
        if room.fallback.tv_input.is_empty() {
            return Err(config::ConfigError::Message(format!(
                "missing fallback tv_input in room {}",
                room.id
            )));
        }
        if let Some(target) = room.inputs.iter().find(|t| t.tv_input.is_empty()) {
            return Err(config::ConfigError::Message(format!(
                "missing tv_input for input {} in room {}",
                target.name, room.id
            )));
        }
    }

    Ok(settings)
}
