// Admin views: site index, app index, changelist and change view

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::site::{AdminSite, ModelAdmin};
use crate::urls::ViewRequest;
use crate::utils::response_handler::{method_not_allowed, HandlerResponse};

const READ_ONLY: [Method; 2] = [Method::GET, Method::HEAD];

fn read_only(request: &ViewRequest) -> Option<Response> {
    if READ_ONLY.contains(&request.method) {
        None
    } else {
        Some(method_not_allowed(&request.method, &READ_ONLY))
    }
}

fn model_entry(admin: &ModelAdmin) -> Value {
    json!({
        "model_name": admin.model_name,
        "verbose_name_plural": admin.verbose_name_plural,
        "changelist": format!("{}/{}/", admin.app_label, admin.model_name),
    })
}

fn group_by_app(admins: &[ModelAdmin]) -> Vec<Value> {
    let mut apps: Vec<(String, Vec<Value>)> = Vec::new();

    for admin in admins {
        match apps.iter_mut().find(|(label, _)| *label == admin.app_label) {
            Some((_, models)) => models.push(model_entry(admin)),
            None => apps.push((admin.app_label.clone(), vec![model_entry(admin)])),
        }
    }

    apps.into_iter()
        .map(|(app_label, models)| json!({ "app_label": app_label, "models": models }))
        .collect()
}

fn unknown_model(app_label: &str, model_name: &str) -> Response {
    HandlerResponse::new(StatusCode::NOT_FOUND)
        .data(json!({ "app_label": app_label, "model_name": model_name }))
        .message(format!("No admin registered for '{}.{}'", app_label, model_name))
        .into_response()
}

/// Lists every app and its registered models
#[instrument(name = "admin_index", skip(site, request), fields(site = %site.name()))]
pub async fn index(site: AdminSite, request: ViewRequest) -> Response {
    if let Some(rejection) = read_only(&request) {
        return rejection;
    }

    let apps: Vec<Value> = group_by_app(&site.model_admins(None));
    info!("Admin index with {} app(s)", apps.len());

    HandlerResponse::new(StatusCode::OK)
        .data(json!({ "site": site.name(), "apps": apps }))
        .message("Site administration")
        .into_response()
}

/// Lists the models of one app
#[instrument(name = "admin_app_index", skip(site, request))]
pub async fn app_index(site: AdminSite, request: ViewRequest) -> Response {
    if let Some(rejection) = read_only(&request) {
        return rejection;
    }

    let app_label: &str = request.capture("app_label").unwrap_or_default();
    let admins: Vec<ModelAdmin> = site.model_admins(Some(app_label));

    if admins.is_empty() {
        return HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({ "app_label": app_label }))
            .message(format!("No app labelled '{}'", app_label))
            .into_response();
    }

    HandlerResponse::new(StatusCode::OK)
        .data(json!({ "app_label": app_label, "models": admins.iter().map(model_entry).collect::<Vec<Value>>() }))
        .message(format!("{} administration", app_label))
        .into_response()
}

/// Rows of one model, projected onto its `list_display`
#[instrument(name = "admin_changelist", skip(site, request))]
pub async fn changelist(site: AdminSite, request: ViewRequest) -> Response {
    if let Some(rejection) = read_only(&request) {
        return rejection;
    }

    let app_label: &str = request.capture("app_label").unwrap_or_default();
    let model_name: &str = request.capture("model_name").unwrap_or_default();

    let Some(admin) = site.model_admin(app_label, model_name) else {
        return unknown_model(app_label, model_name);
    };

    let rows: Vec<Value> = admin
        .source
        .objects()
        .await
        .into_iter()
        .map(|row: Value| admin.project(row))
        .collect();

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "app_label": admin.app_label,
            "model_name": admin.model_name,
            "list_display": admin.list_display,
            "count": rows.len(),
            "results": rows,
        }))
        .message(format!("Select {} to change", admin.verbose_name_plural))
        .into_response()
}

/// A single object of one model
#[instrument(name = "admin_change", skip(site, request))]
pub async fn change(site: AdminSite, request: ViewRequest) -> Response {
    if let Some(rejection) = read_only(&request) {
        return rejection;
    }

    let app_label: &str = request.capture("app_label").unwrap_or_default();
    let model_name: &str = request.capture("model_name").unwrap_or_default();
    let raw_id: &str = request.capture("object_id").unwrap_or_default();

    let Some(admin) = site.model_admin(app_label, model_name) else {
        return unknown_model(app_label, model_name);
    };

    let object: Option<Value> = match raw_id.parse::<u64>() {
        Ok(id) => admin.source.object(id).await,
        Err(_) => None,
    };

    match object {
        Some(object) => HandlerResponse::new(StatusCode::OK)
            .data(object)
            .message(format!("Change {}", admin.model_name))
            .into_response(),
        None => HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({ "object_id": raw_id }))
            .message(format!("{} with ID '{}' doesn't exist", admin.model_name, raw_id))
            .into_response(),
    }
}
