// Admin registration for the user model

use std::sync::Arc;

use super::store::UserStore;
use crate::admin::{AdminError, AdminSite, ModelAdmin};

pub const APP_LABEL: &str = "restapp";

/// Registers `User` with the admin site, listing a few identifying columns
pub fn register(site: &AdminSite, store: &UserStore) -> Result<(), AdminError> {
    site.register(
        ModelAdmin::new(APP_LABEL, "user", Arc::new(store.clone()))
            .verbose_name_plural("users")
            .list_display(&["id", "username", "email", "is_staff"]),
    )
}
