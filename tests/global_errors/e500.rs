//! tests/global_errors/e500.rs
//! Ensures that a view failing with 500 still answers in the standard envelope.

use crate::common;

use std::sync::Arc;

use reqwest::StatusCode;
use rest_example::config::{environment::EnvironmentVariables, state::AppState};
use rest_example::urls::{view, RouteTable, ViewRequest};
use serde_json::Value;

async fn failing_view(_state: AppState, _request: ViewRequest) -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
}

#[tokio::test]
async fn returns_500_on_internal_error() {
    let state: AppState = AppState::new(EnvironmentVariables::default()).expect("Failed to build app state");

    let routes: RouteTable<AppState> = RouteTable::new()
        .route("^broken/$", view(failing_view))
        .expect("Invalid route pattern");

    let base_url: String = common::spawn_state(AppState {
        routes: Arc::new(routes),
        ..state
    });

    let resp: reqwest::Response = common::client()
        .get(format!("{}/broken/", base_url))
        .send()
        .await
        .expect("Failed to make request.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "INTERNAL_SERVER_ERROR");
    assert_eq!(json["code"], 500);
    assert_eq!(json["data"], Value::Null);
}
