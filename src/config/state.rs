// Application state shared with every view

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::admin::AdminSite;
use crate::api::users::{self, UserStore};
use crate::config::environment::EnvironmentVariables;
use crate::routes::url_patterns;
use crate::urls::RouteTable;

#[derive(Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub users: UserStore,
    pub admin: AdminSite,
    // * Built once at start-up, read-only afterwards
    pub routes: Arc<RouteTable<AppState>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.environment)
            .field("admin", &self.admin)
            .field("routes", &self.routes.patterns())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Autodiscovers the admin site, then builds the root route table
    pub fn new(environment: EnvironmentVariables) -> Result<Self> {
        let users: UserStore = UserStore::new();
        let admin: AdminSite = AdminSite::new("admin");

        admin
            .autodiscover(|site: &AdminSite| users::admin::register(site, &users))
            .context("Admin autodiscovery failed")?;

        let routes: RouteTable<AppState> = url_patterns(&admin).context("Failed to build the route table")?;
        info!("Route table ready: {:?}", routes.patterns());

        Ok(Self {
            environment: Arc::new(environment),
            users,
            admin,
            routes: Arc::new(routes),
        })
    }
}
