// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Alexa skill request and response messages.
//!
//! Only the fields required for intent dispatching are modelled, all others are ignored.
//! See <https://developer.amazon.com/en-US/docs/alexa/custom-skills/request-and-response-json-reference.html>

use crate::dispatch::SlotLookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: RequestBody,
}

impl SkillRequest {
    /// Application identifier from the session, or from the system context if there's no session.
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.as_ref())
                    .and_then(|s| s.application.as_ref())
            })
            .map(|a| a.application_id.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<SystemContext>,
}

#[derive(Debug, Deserialize)]
pub struct SystemContext {
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

impl SlotLookup for Intent {
    fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|s| s.value.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct SkillResponse {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    pub should_end_session: bool,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub text: String,
}

impl SkillResponse {
    /// Plain text speech response, ending the session.
    pub fn speech(text: impl Into<String>) -> Self {
        Self {
            version: "1.0",
            response: ResponseBody {
                output_speech: Some(OutputSpeech {
                    speech_type: "PlainText",
                    text: text.into(),
                }),
                should_end_session: true,
            },
        }
    }

    /// Response without speech, e.g. for a `SessionEndedRequest`.
    pub fn empty() -> Self {
        Self {
            version: "1.0",
            response: ResponseBody {
                output_speech: None,
                should_end_session: true,
            },
        }
    }
}
