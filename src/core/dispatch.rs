// Dispatches every request through the application route table

use axum::{
    body::Bytes,
    extract::State,
    http::{header::LOCATION, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use serde_json::json;
use std::borrow::Cow;
use tracing::{debug, info, instrument};

use crate::config::state::AppState;
use crate::urls::{Resolved, ViewRequest};
use crate::utils::response_handler::HandlerResponse;

/// Fallback handler: resolve the path, then hand the request to the matched view.
/// The body goes through the `Bytes` extractor so `DefaultBodyLimit` applies.
#[instrument(name = "dispatch", skip_all, fields(method = %method, path = %uri.path()))]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    // Routes match the decoded path; bytes that are not UTF-8 match nothing
    let Some(path) = decode_path(uri.path()) else {
        info!("Undecodable path '{}'", uri.path());
        return HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({ "path": uri.path() }))
            .message(format!("No route matches '{}'", uri.path()))
            .into_response();
    };
    let path: &str = &path;

    let Some(resolved) = state.routes.resolve(path) else {
        if let Some(location) = append_slash_location(&state, &method, &uri, path) {
            info!("Redirecting '{}' to '{}'", path, location);
            return redirect(location);
        }

        info!("No route matches '{}'", path);
        return HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({ "path": path }))
            .message(format!("No route matches '{}'", path))
            .into_response();
    };

    debug!("Resolved '{}' via {:?} with {:?}", path, resolved.chain, resolved.captures);

    let Resolved { handler, captures, .. } = resolved;
    let request: ViewRequest = ViewRequest {
        method,
        path: path.to_string(),
        query: uri.query().map(String::from),
        captures,
        body,
    };

    handler(state, request).await
}

/// Percent-decodes a request path, `None` when the result is not UTF-8
pub fn decode_path(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Where a slash-less path should be redirected, if anywhere.
/// Only safe methods are redirected, and only when `decoded/` resolves.
/// The location keeps the path as the client sent it.
pub fn append_slash_location(state: &AppState, method: &Method, uri: &Uri, decoded: &str) -> Option<String> {
    if !state.environment.append_slash || !(*method == Method::GET || *method == Method::HEAD) {
        return None;
    }

    if decoded.ends_with('/') {
        return None;
    }

    state.routes.resolve(&format!("{}/", decoded))?;

    let candidate: String = format!("{}/", uri.path());

    Some(match uri.query() {
        Some(query) => format!("{}?{}", candidate, query),
        None => candidate,
    })
}

fn redirect(location: String) -> Response {
    let message: String = format!("Moved permanently to '{}'", location);

    (
        [(LOCATION, location.clone())],
        HandlerResponse::new(StatusCode::MOVED_PERMANENTLY)
            .data(json!({ "location": location }))
            .message(message),
    )
        .into_response()
}
