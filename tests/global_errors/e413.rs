//! tests/global_errors/e413.rs
//! Ensures that a payload above MAX_REQUEST_BODY_SIZE triggers 413.

use crate::common;

use reqwest::StatusCode;
use rest_example::config::environment::EnvironmentVariables;
use serde_json::Value;

#[tokio::test]
async fn returns_413_when_payload_exceeds_global_limit() {
    let base_url: String = common::spawn_app_with(EnvironmentVariables {
        max_request_body_size: 1024,
        ..EnvironmentVariables::default()
    });

    let oversized_payload: Vec<u8> = vec![b'X'; 4096];

    let resp: reqwest::Response = common::client()
        .post(format!("{}/user/", base_url))
        .body(oversized_payload)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}
