// Library root: an Axum service dispatched through an ordered route table

pub mod admin;
pub mod api;
pub mod config;
pub mod core;
pub mod routes;
pub mod urls;
pub mod utils;

pub use crate::admin::AdminSite;
pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
pub use crate::urls::RouteTable;
