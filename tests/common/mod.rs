//! tests/common/mod.rs
//! A shared test helper to spawn the app on an ephemeral port.

#![allow(dead_code)]

use rest_example::config::{environment::EnvironmentVariables, state::AppState};
use rest_example::core::server::create_app;

use axum::{serve, Router};
use tokio::net::TcpListener as TokioTcpListener;

/// Spawns the app with default settings and returns its base URL.
pub fn spawn_app() -> String {
    spawn_app_with(EnvironmentVariables::default())
}

/// Spawns the app with the given settings and returns its base URL.
pub fn spawn_app_with(env: EnvironmentVariables) -> String {
    // * Fresh state per test: autodiscovery plus route table construction.
    let state: AppState = AppState::new(env).expect("Failed to build app state");
    spawn_state(state)
}

/// Spawns the app around an already built state and returns its base URL.
pub fn spawn_state(state: AppState) -> String {
    let app: Router = create_app(state);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    format!("http://{}", addr)
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Parses the response envelope.
pub async fn envelope(resp: reqwest::Response) -> serde_json::Value {
    let body: String = resp.text().await.expect("Failed to read body");
    serde_json::from_str(&body).expect("Body is not JSON")
}
