// Start of file: src/routes.rs

// * The root route table. Order matters: the first matching pattern wins.

use crate::admin::AdminSite;
use crate::api::users::handler::{user_detail, user_list};
use crate::config::state::AppState;
use crate::urls::{view, RouteError, RouteTable};

pub const ADMIN_PREFIX: &str = "^admin/";
pub const USER_LIST: &str = "^user/";
pub const USER_DETAIL: &str = r"^users/(?P<pk>[0-9]+)/$";

/// Builds the application routes. `admin` must already be autodiscovered.
pub fn url_patterns(admin: &AdminSite) -> Result<RouteTable<AppState>, RouteError> {
    RouteTable::new()
        .include(ADMIN_PREFIX, admin.urls()?)?
        .named_route(USER_LIST, view(user_list), "user-list")?
        .named_route(USER_DETAIL, view(user_detail), "user-detail")
}


// End of file: src/routes.rs
