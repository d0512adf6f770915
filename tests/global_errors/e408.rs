//! tests/global_errors/e408.rs
//! Ensures that a view outliving DEFAULT_TIMEOUT_SECONDS results in a 408.

use crate::common;

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use rest_example::config::{environment::EnvironmentVariables, state::AppState};
use rest_example::urls::{view, RouteTable, ViewRequest};
use serde_json::Value;
use tokio::time::timeout;

async fn slow_view(_state: AppState, _request: ViewRequest) -> axum::http::StatusCode {
    tokio::time::sleep(Duration::from_secs(3)).await;
    axum::http::StatusCode::OK
}

#[tokio::test]
async fn returns_408_when_request_times_out() {
    let state: AppState = AppState::new(EnvironmentVariables {
        default_timeout_seconds: 1,
        ..EnvironmentVariables::default()
    })
    .expect("Failed to build app state");

    let routes: RouteTable<AppState> = RouteTable::new()
        .route("^slow/$", view(slow_view))
        .expect("Invalid route pattern");

    let base_url: String = common::spawn_state(AppState {
        routes: Arc::new(routes),
        ..state
    });

    let resp_result: Result<Result<reqwest::Response, reqwest::Error>, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(5), // client-side timeout duration
        common::client().get(format!("{}/slow/", base_url)).send(),
    )
    .await;

    // Ensure the client did not timeout waiting for a response.
    assert!(resp_result.is_ok(), "Client timed out waiting for server.");

    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}
