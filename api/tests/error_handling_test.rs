#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use common::{post, send, TestContext};
use serde_json::json;

#[actix_rt::test]
async fn test_errors_default_to_italian() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, body) = send(
        &app,
        post("/api/v1/auth/send-code", json!({"phone_number": "abc"})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PHONE");
    assert_ne!(body["error"], "Invalid phone number.");
    assert!(body["timestamp"].is_string());
}

#[actix_rt::test]
async fn test_errors_follow_accept_language() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, body) = send(
        &app,
        post("/api/v1/auth/send-code", json!({"phone_number": "abc"}))
            .insert_header(("Accept-Language", "en-US,en;q=0.9"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid phone number.");
}

#[actix_rt::test]
async fn test_missing_phone_names_the_field() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, body) = send(
        &app,
        post("/api/v1/auth/send-code", json!({}))
            .insert_header(("Accept-Language", "en"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "The phone_number field is required.");
}

#[actix_rt::test]
async fn test_malformed_code_reads_as_invalid_code() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, body) = send(
        &app,
        post(
            "/api/v1/auth/verify-code",
            json!({"phone_number": "+393331234567", "code": "12"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CODE");
}

#[actix_rt::test]
async fn test_malformed_json_is_validation_error() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_store_failure_is_internal_error() {
    let ctx = TestContext::new();
    ctx.otps.set_failing(true).await;
    let app = init_app!(ctx);

    let (status, body) = send(
        &app,
        post("/api/v1/auth/send-code", json!({"phone_number": "+393331234567"}))
            .insert_header(("Accept-Language", "en"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error.");
}

#[actix_rt::test]
async fn test_unknown_route_is_localized_not_found() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/nope").insert_header(("Accept-Language", "en")).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Resource not found.");
}

#[actix_rt::test]
async fn test_health_without_checks_is_healthy() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, body) = send(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
