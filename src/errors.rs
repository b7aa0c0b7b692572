// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Custom application error with conversions from common Rust and 3rd-party errors.

use awc::error::{ConnectError, SendRequestError};
use derive_more::Display;
use log::error;

#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display("Internal server error: {_0}")]
    InternalServerError(String),

    #[display("Internal serialization error: {_0}")]
    SerializationError(String),

    /// A required intent slot is not set or empty.
    #[display("Missing slot: {_0}")]
    MissingSlot(String),

    /// An intent slot value can't be converted.
    #[display("Invalid value '{value}' for slot {slot}")]
    InvalidSlot { slot: String, value: String },

    /// The intent is not part of the room's vocabulary.
    #[display("Unsupported intent: {_0}")]
    UnsupportedIntent(String),

    #[display("Unknown room: {_0}")]
    UnknownRoom(String),

    /// Device controller couldn't be reached.
    #[display("Connection error: {_0}")]
    Connection(String),

    #[display("Request timed out")]
    Timeout,

    /// Device controller responded with a non-2xx status code.
    #[display("HTTP status {_0}")]
    HttpStatus(u16),
}

impl ServiceError {
    /// Returns true if the error originates from the inbound intent and not from a device call.
    pub fn is_intent_error(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingSlot(_)
                | ServiceError::InvalidSlot { .. }
                | ServiceError::UnsupportedIntent(_)
        )
    }
}

impl std::error::Error for ServiceError {}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        ServiceError::InternalServerError(format!("{e:?}"))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        error!("{e:?}");
        ServiceError::SerializationError(e.to_string())
    }
}

impl From<SendRequestError> for ServiceError {
    fn from(e: SendRequestError) -> Self {
        match e {
            SendRequestError::Timeout | SendRequestError::Connect(ConnectError::Timeout) => {
                ServiceError::Timeout
            }
            e => ServiceError::Connection(e.to_string()),
        }
    }
}
