// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse, error};
use serde::Serialize;

/// JSON body of all responses that are not skill responses.
///
/// Used for rejected skill requests (unknown room, application id mismatch, invalid payload)
/// and for the `/health` endpoint, which returns the application version as `message`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

impl<'a> ApiResponse<'a> {
    pub fn new(code: &'a str, message: &'a str) -> ApiResponse<'a> {
        ApiResponse {
            code: Some(code),
            message: Some(message),
        }
    }
}

/// Map skill request payload errors to a JSON [`ApiResponse`].
///
/// A skill request exceeding `integration.json_limit_kb` is rejected with 413.
pub fn json_error_handler(err: error::JsonPayloadError, _: &HttpRequest) -> Error {
    let message = err.to_string();

    let resp = match &err {
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
            .json(ApiResponse::new("UNSUPPORTED_MEDIA_TYPE", &message)),
        JsonPayloadError::Deserialize(json_err) if json_err.is_data() => {
            HttpResponse::BadRequest().json(ApiResponse::new("INVALID_JSON", &message))
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge().json(ApiResponse::new("PAYLOAD_TOO_LARGE", &message))
        }
        _ => HttpResponse::BadRequest().json(ApiResponse::new("BAD_REQUEST", &message)),
    };

    error::InternalError::from_response(err, resp).into()
}
