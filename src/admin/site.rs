// Admin site: model registry, one-time autodiscovery and the mounted sub-table

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::info;

use super::{error::AdminError, handler};
use crate::urls::{view, RouteError, RouteTable, ViewRequest};

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the rows of a registered model, as JSON objects
pub trait ModelSource: Send + Sync {
    fn objects(&self) -> SourceFuture<'_, Vec<Value>>;

    fn object(&self, id: u64) -> SourceFuture<'_, Option<Value>>;
}

/// Admin options for one model
#[derive(Clone)]
pub struct ModelAdmin {
    pub app_label: String,
    pub model_name: String,
    pub verbose_name_plural: String,
    pub list_display: Vec<String>,
    pub source: Arc<dyn ModelSource>,
}

impl fmt::Debug for ModelAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdmin")
            .field("app_label", &self.app_label)
            .field("model_name", &self.model_name)
            .field("verbose_name_plural", &self.verbose_name_plural)
            .field("list_display", &self.list_display)
            .finish_non_exhaustive()
    }
}

impl ModelAdmin {
    pub fn new(app_label: &str, model_name: &str, source: Arc<dyn ModelSource>) -> Self {
        Self {
            app_label: app_label.to_lowercase(),
            model_name: model_name.to_lowercase(),
            verbose_name_plural: format!("{}s", model_name.to_lowercase()),
            list_display: Vec::new(),
            source,
        }
    }

    pub fn verbose_name_plural(mut self, name: &str) -> Self {
        self.verbose_name_plural = name.to_string();
        self
    }

    /// Columns shown in the changelist; empty means every field
    pub fn list_display(mut self, columns: &[&str]) -> Self {
        self.list_display = columns.iter().map(|c: &&str| c.to_string()).collect();
        self
    }

    /// Projects a row onto `list_display`
    pub fn project(&self, row: Value) -> Value {
        if self.list_display.is_empty() {
            return row;
        }

        match row {
            Value::Object(fields) => Value::Object(
                self.list_display
                    .iter()
                    .map(|column: &String| (column.clone(), fields.get(column).cloned().unwrap_or(Value::Null)))
                    .collect(),
            ),
            other => other,
        }
    }
}

type RegistryKey = (String, String);

struct SiteInner {
    name: String,
    registry: RwLock<BTreeMap<RegistryKey, ModelAdmin>>,
    discovered: OnceCell<()>,
}

/// A set of registered models served under a mount prefix
#[derive(Clone)]
pub struct AdminSite {
    inner: Arc<SiteInner>,
}

impl fmt::Debug for AdminSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSite")
            .field("name", &self.inner.name)
            .field("models", &self.registered())
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl Default for AdminSite {
    fn default() -> Self {
        Self::new("admin")
    }
}

impl AdminSite {
    pub fn new(name: &str) -> Self {
        Self {
            inner: Arc::new(SiteInner {
                name: name.to_string(),
                registry: RwLock::new(BTreeMap::new()),
                discovered: OnceCell::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Adds a model; each `(app_label, model_name)` may be registered once
    pub fn register(&self, model_admin: ModelAdmin) -> Result<(), AdminError> {
        let key: RegistryKey = (model_admin.app_label.clone(), model_admin.model_name.clone());
        let mut registry = self.inner.registry.write().unwrap_or_else(PoisonError::into_inner);

        if registry.contains_key(&key) {
            return Err(AdminError::AlreadyRegistered {
                app_label: key.0,
                model_name: key.1,
            });
        }

        info!("Registered admin model {}.{}", key.0, key.1);
        registry.insert(key, model_admin);
        Ok(())
    }

    /// Runs `register` exactly once per site. Later calls are no-ops;
    /// a failed run leaves the site undiscovered so it can be retried.
    pub fn autodiscover<F>(&self, register: F) -> Result<(), AdminError>
    where
        F: FnOnce(&AdminSite) -> Result<(), AdminError>,
    {
        self.inner.discovered.get_or_try_init(|| {
            register(self)?;
            info!("Admin site '{}' autodiscovered {} model(s)", self.inner.name, self.registered().len());
            Ok::<(), AdminError>(())
        })?;

        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.inner.discovered.get().is_some()
    }

    /// `(app_label, model_name)` pairs in registry order
    pub fn registered(&self) -> Vec<RegistryKey> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn model_admin(&self, app_label: &str, model_name: &str) -> Option<ModelAdmin> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(app_label.to_string(), model_name.to_string()))
            .cloned()
    }

    /// Every model admin of one app, or all of them when `app_label` is `None`
    pub fn model_admins(&self, app_label: Option<&str>) -> Vec<ModelAdmin> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|admin: &&ModelAdmin| app_label.map_or(true, |label: &str| admin.app_label == label))
            .cloned()
            .collect()
    }

    /// The admin sub-table, to be mounted with `RouteTable::include`.
    /// Only available once the site has been autodiscovered.
    pub fn urls<S>(&self) -> Result<RouteTable<S>, RouteError>
    where
        S: Send + 'static,
    {
        if !self.is_ready() {
            return Err(RouteError::AdminNotReady);
        }

        let index_site: AdminSite = self.clone();
        let app_site: AdminSite = self.clone();
        let changelist_site: AdminSite = self.clone();
        let change_site: AdminSite = self.clone();

        RouteTable::new()
            .named_route(
                "^$",
                view(move |_state: S, request: ViewRequest| handler::index(index_site.clone(), request)),
                "admin:index",
            )?
            .named_route(
                r"^(?P<app_label>\w+)/$",
                view(move |_state: S, request: ViewRequest| handler::app_index(app_site.clone(), request)),
                "admin:app_list",
            )?
            .named_route(
                r"^(?P<app_label>\w+)/(?P<model_name>\w+)/$",
                view(move |_state: S, request: ViewRequest| handler::changelist(changelist_site.clone(), request)),
                "admin:changelist",
            )?
            .named_route(
                r"^(?P<app_label>\w+)/(?P<model_name>\w+)/(?P<object_id>[0-9]+)/$",
                view(move |_state: S, request: ViewRequest| handler::change(change_site.clone(), request)),
                "admin:change",
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Vec<Value>);

    impl ModelSource for Fixed {
        fn objects(&self) -> SourceFuture<'_, Vec<Value>> {
            Box::pin(async move { self.0.clone() })
        }

        fn object(&self, id: u64) -> SourceFuture<'_, Option<Value>> {
            Box::pin(async move { self.0.iter().find(|row: &&Value| row["id"] == id).cloned() })
        }
    }

    fn model(app: &str, name: &str) -> ModelAdmin {
        ModelAdmin::new(app, name, Arc::new(Fixed(vec![json!({ "id": 1, "name": "a", "secret": "x" })])))
    }

    #[test]
    fn rejects_duplicate_registration() {
        let site: AdminSite = AdminSite::default();
        site.register(model("restapp", "user")).unwrap();

        let err: AdminError = site.register(model("RestApp", "User")).unwrap_err();
        assert!(matches!(err, AdminError::AlreadyRegistered { .. }));
        assert_eq!(site.registered().len(), 1);
    }

    #[test]
    fn autodiscover_runs_once() {
        let site: AdminSite = AdminSite::default();
        assert!(!site.is_ready());

        site.autodiscover(|s: &AdminSite| s.register(model("restapp", "user"))).unwrap();
        // A second hook would fail on the duplicate if it ran at all
        site.autodiscover(|s: &AdminSite| s.register(model("restapp", "user"))).unwrap();

        assert!(site.is_ready());
        assert_eq!(site.registered(), vec![("restapp".to_string(), "user".to_string())]);
    }

    #[test]
    fn failed_autodiscover_can_be_retried() {
        let site: AdminSite = AdminSite::default();
        site.register(model("restapp", "user")).unwrap();

        assert!(site.autodiscover(|s: &AdminSite| s.register(model("restapp", "user"))).is_err());
        assert!(!site.is_ready());

        site.autodiscover(|_: &AdminSite| Ok(())).unwrap();
        assert!(site.is_ready());
    }

    #[test]
    fn urls_require_autodiscover() {
        let site: AdminSite = AdminSite::default();
        assert!(matches!(site.urls::<()>(), Err(RouteError::AdminNotReady)));

        site.autodiscover(|_: &AdminSite| Ok(())).unwrap();
        let table: RouteTable<()> = site.urls().unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.resolve("").and_then(|r| r.name).as_deref(), Some("admin:index"));
        assert_eq!(
            table.resolve("restapp/user/3/").and_then(|r| r.name).as_deref(),
            Some("admin:change")
        );
        assert!(table.resolve("restapp/user/x/").is_none());
    }

    #[test]
    fn projection_follows_list_display() {
        let admin: ModelAdmin = model("restapp", "user").list_display(&["id", "name", "missing"]);
        let row: Value = admin.project(json!({ "id": 1, "name": "a", "secret": "x" }));

        assert_eq!(row, json!({ "id": 1, "name": "a", "missing": null }));
    }
}
