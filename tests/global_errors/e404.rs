//! tests/global_errors/e404.rs
//! Paths that match no route answer 404 in the standard envelope.

use crate::common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = common::client()
        .get(format!("{}/does-not-exist/", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["path"], "/does-not-exist/");
}

#[tokio::test]
async fn non_numeric_pk_falls_through_to_404() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = common::client()
        .get(format!("{}/users/abc/", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["messages"][0], "No route matches '/users/abc/'");
}

#[tokio::test]
async fn list_route_does_not_match_deeper_paths() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = common::client()
        .get(format!("{}/user/1/", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
