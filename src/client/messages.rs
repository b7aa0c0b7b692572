// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Actix actor message definitions used to communicate with the [`DeviceClient`].

#[allow(unused_imports)] // used for doc links
use crate::client::DeviceClient;
use crate::client::model::DeviceRequest;
use crate::errors::ServiceError;
use actix::prelude::Message;

/// Send a request to a device controller.
///
/// The result is the HTTP status code of a successful (2xx) response. Transport errors and
/// non-2xx responses are already logged by the client: senders using `do_send` may ignore it.
#[derive(Debug, Message)]
#[rtype(result = "Result<u16, ServiceError>")]
pub struct DeviceRequestMsg {
    /// Log prefix of the originating voice request.
    pub id: String,
    pub request: DeviceRequest,
}
