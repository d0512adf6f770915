// Start of file: src/main.rs

use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use rest_example::config::{environment::EnvironmentVariables, state::AppState};
use rest_example::core::{
    logging::init_tracing,
    server::{create_app, setup_listener, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let environment: &'static EnvironmentVariables = EnvironmentVariables::instance()?;

    // Admin autodiscovery runs inside, before the route table is built
    let state: AppState = AppState::new(environment.clone())?;

    let listener: TcpListener = setup_listener(environment).await?;
    info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
