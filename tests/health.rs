//! Health endpoint tests.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn health_check_returns_ok() {
    let server = common::test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "booking-pricing-test");
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let server = common::test_server();

    let response = server.get("/api/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["errorType"], "not_found");
}
