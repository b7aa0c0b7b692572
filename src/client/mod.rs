// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Device controller REST client implemented as Actix actor.
//!
//! Every [`DeviceRequestMsg`] is handled in its own future: requests don't wait for each other
//! and a slow or unreachable controller doesn't block other devices.

use crate::configuration::DeviceSettings;
use crate::errors::ServiceError;
use actix::{Actor, Context, Handler, ResponseFuture};
use log::{debug, error, info, warn};

pub mod messages;
pub mod model;
#[cfg(test)]
pub(crate) mod recorder;

pub use messages::DeviceRequestMsg;
pub use model::{DeviceCommand, DeviceRequest, ReceiverPatch};

pub struct DeviceClient {
    /// HTTP client
    // a single client is shared by all requests, it's cheap to clone
    client: awc::Client,
}

impl DeviceClient {
    pub fn new(settings: &DeviceSettings) -> Self {
        Self {
            client: new_device_client(settings),
        }
    }
}

impl Actor for DeviceClient {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        debug!("Device client started");
    }
}

impl Handler<DeviceRequestMsg> for DeviceClient {
    type Result = ResponseFuture<Result<u16, ServiceError>>;

    fn handle(&mut self, msg: DeviceRequestMsg, _ctx: &mut Self::Context) -> Self::Result {
        let client = self.client.clone();
        Box::pin(async move { send_device_request(&client, &msg.id, &msg.request).await })
    }
}

/// Create the HTTP client for device requests.
///
/// The timeout covers the whole request: connection setup, sending and receiving the response.
pub fn new_device_client(settings: &DeviceSettings) -> awc::Client {
    awc::Client::builder()
        .timeout(settings.request_timeout)
        .finish()
}

/// Send a device request: a JSON `POST` for an action or a JSON `PUT` for a receiver update.
///
/// Every outcome is logged: transport errors with `error`, non-2xx status codes with `warn`.
///
/// # Arguments
///
/// * `client`: HTTP client
/// * `id`: log prefix
/// * `request`: device request to send
///
/// returns: the HTTP status code of a successful response.
pub async fn send_device_request(
    client: &awc::Client,
    id: &str,
    request: &DeviceRequest,
) -> Result<u16, ServiceError> {
    let url = request.endpoint().as_str();
    info!("[{id}] -> {request}");

    let result = match request {
        DeviceRequest::Action { command, .. } => client.post(url).send_json(command).await,
        DeviceRequest::Receiver { patch, .. } => client.put(url).send_json(patch).await,
    };

    let mut response = match result {
        Ok(response) => response,
        Err(e) => {
            let e = ServiceError::from(e);
            error!("[{id}] {} {url} failed: {e}", request.method());
            return Err(e);
        }
    };

    let status = response.status();
    let body = match response.body().await {
        Ok(body) => String::from_utf8_lossy(&body).to_string(),
        Err(e) => {
            warn!("[{id}] Error reading response body from {url}: {e}");
            String::new()
        }
    };

    if status.is_success() {
        info!("[{id}] <- {url} response status: {status}");
        debug!("[{id}] <- {url} response body: {body}");
        Ok(status.as_u16())
    } else {
        warn!("[{id}] <- {url} unexpected response status: {status}, body: {body}");
        Err(ServiceError::HttpStatus(status.as_u16()))
    }
}
