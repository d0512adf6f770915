//! tests/global_errors/e405.rs
//! Unsupported methods on a matched route answer 405 with an Allow header.

use crate::common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_405_with_allow_header() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = common::client()
        .delete(format!("{}/user/", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()["allow"], "GET, HEAD, POST");

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["code"], 405);
}

#[tokio::test]
async fn admin_is_read_only() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = common::client()
        .post(format!("{}/admin/restapp/user/", base_url))
        .body("{}")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()["allow"], "GET, HEAD");
}
