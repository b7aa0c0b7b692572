// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Alexa skill endpoint.

use crate::APP_VERSION;
use crate::dispatch::{Dispatcher, NoSlots};
use crate::errors::ServiceError;
use actix_web::{HttpResponse, get, post, web};
use alexa::{INTENT_REQUEST, LAUNCH_REQUEST, SkillRequest, SkillResponse};
use log::{info, warn};
use uuid::Uuid;
use web_model::ApiResponse;

pub use web_model::json_error_handler;

pub mod alexa;
pub mod web_model;

/// Register all server routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(echo_intent).service(health);
}

#[post("/echo/{room}")]
pub async fn echo_intent(
    room_id: web::Path<String>,
    request: web::Json<SkillRequest>,
    dispatcher: web::Data<Dispatcher>,
) -> HttpResponse {
    let room_id = room_id.into_inner();
    let request = request.into_inner();
    let id = format!(
        "{room_id}/{}",
        request
            .request
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    );

    let Some(room) = dispatcher.room(&room_id) else {
        warn!("[{id}] Unknown room");
        return HttpResponse::NotFound().json(ApiResponse::new("NOT_FOUND", "Unknown room"));
    };

    if let Some(app_id) = room.app_id()
        && request.application_id() != Some(app_id)
    {
        warn!(
            "[{id}] Rejecting request of application {:?}",
            request.application_id()
        );
        return HttpResponse::Forbidden().json(ApiResponse::new("FORBIDDEN", "Invalid application id"));
    }

    let result = match request.request.request_type.as_str() {
        LAUNCH_REQUEST => dispatcher.handle_intent(&id, &room_id, "", &NoSlots),
        INTENT_REQUEST => {
            let intent = request.request.intent.unwrap_or_default();
            dispatcher.handle_intent(&id, &room_id, &intent.name, &intent)
        }
        other => {
            info!("[{id}] Ignoring {other}");
            return HttpResponse::Ok().json(SkillResponse::empty());
        }
    };

    match result {
        Ok(speech) => HttpResponse::Ok().json(SkillResponse::speech(speech)),
        Err(ServiceError::UnknownRoom(_)) => {
            HttpResponse::NotFound().json(ApiResponse::new("NOT_FOUND", "Unknown room"))
        }
        Err(e) => HttpResponse::InternalServerError()
            .json(ApiResponse::new("ERROR", &e.to_string())),
    }
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new("OK", APP_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DeviceRequest;
    use crate::client::recorder::{RecordedCalls, RecordingClient};
    use crate::configuration::Settings;
    use actix::Actor;
    use actix_web::rt::time::sleep;
    use actix_web::{App, http::StatusCode, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::time::Duration;

    const FR_APP: &str = "amzn1.ask.skill.family-room";

    fn dispatcher() -> (web::Data<Dispatcher>, RecordedCalls) {
        let mut settings = Settings::default();
        settings.devices.power_on_delay = Duration::from_millis(10);
        settings.rooms[0].app_id = Some(FR_APP.into());
        settings.rooms[1].app_id = None;
        let recorder = RecordingClient::default();
        let calls = recorder.calls();
        let dispatcher = Dispatcher::new(&settings, recorder.start().recipient());
        (web::Data::new(dispatcher), calls)
    }

    fn skill_request(app_id: &str, request: Value) -> Value {
        json!({
            "version": "1.0",
            "session": { "application": { "applicationId": app_id } },
            "request": request
        })
    }

    fn intent_request(app_id: &str, name: &str, slots: Value) -> Value {
        skill_request(
            app_id,
            json!({
                "type": "IntentRequest",
                "requestId": "req-1",
                "intent": { "name": name, "slots": slots }
            }),
        )
    }

    fn speech(body: &Value) -> Option<&str> {
        body["response"]["outputSpeech"]["text"].as_str()
    }

    #[actix_web::test]
    async fn off_intent_returns_speech_and_powers_off_devices() {
        let (dispatcher, calls) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/fr")
            .set_json(intent_request(FR_APP, "OFF", json!({})))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(StatusCode::OK, resp.status());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(Some("Processing Request."), speech(&body));
        assert_eq!(Value::Bool(true), body["response"]["shouldEndSession"]);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(2, calls.requests().len(), "TV and receiver");
    }

    #[rstest]
    #[case("VOLUME", json!({}), "I'm sorry I could not process your request VOLUME.")]
    #[case("foo", json!({}), "I'm sorry I could not process your request FOO.")]
    #[case("UNMUTE", json!({}), "I'm sorry I could not process your request UNMUTE.")]
    #[actix_web::test]
    async fn unprocessable_intent_returns_apology(
        #[case] intent: &str,
        #[case] slots: Value,
        #[case] expected: &str,
    ) {
        let (dispatcher, calls) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/mbr")
            .set_json(intent_request("any", intent, slots))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(Some(expected), speech(&body));
        sleep(Duration::from_millis(50)).await;
        assert!(calls.requests().is_empty());
    }

    #[actix_web::test]
    async fn slot_values_are_passed_to_the_dispatcher() {
        let (dispatcher, calls) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/mbr")
            .set_json(intent_request(
                "any",
                "channel",
                json!({ "Number": { "name": "Number", "value": "42" } }),
            ))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(Some("Processing Request."), speech(&body));
        sleep(Duration::from_millis(50)).await;
        let requests = calls.requests();
        assert_eq!(1, requests.len());
        assert!(matches!(
            &requests[0],
            DeviceRequest::Action { command, .. } if command.command == "Channel" && command.value.as_deref() == Some("42")
        ));
    }

    #[actix_web::test]
    async fn wrong_application_id_is_rejected() {
        let (dispatcher, calls) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/fr")
            .set_json(intent_request("amzn1.ask.skill.other", "OFF", json!({})))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(StatusCode::FORBIDDEN, resp.status());
        sleep(Duration::from_millis(50)).await;
        assert!(calls.requests().is_empty());
    }

    #[actix_web::test]
    async fn unknown_room_returns_not_found() {
        let (dispatcher, _) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/kitchen")
            .set_json(intent_request(FR_APP, "OFF", json!({})))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(StatusCode::NOT_FOUND, resp.status());
    }

    #[actix_web::test]
    async fn launch_request_returns_apology() {
        let (dispatcher, _) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/mbr")
            .set_json(skill_request("any", json!({ "type": "LaunchRequest" })))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            Some("I'm sorry I could not process your request ."),
            speech(&body)
        );
    }

    #[actix_web::test]
    async fn session_ended_request_returns_empty_response() {
        let (dispatcher, _) = dispatcher();
        let app = test::init_service(App::new().app_data(dispatcher).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/echo/mbr")
            .set_json(skill_request(
                "any",
                json!({ "type": "SessionEndedRequest", "reason": "USER_INITIATED" }),
            ))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            json!({ "version": "1.0", "response": { "shouldEndSession": true } }),
            body
        );
    }

    #[actix_web::test]
    async fn health_returns_version() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json!({ "code": "OK", "message": APP_VERSION }), body);
    }
}
