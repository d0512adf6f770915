// UserList and UserDetail views

use axum::{
    body::Bytes,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::{
    error::UserError,
    model::{NewUser, User, UserPatch},
};
use crate::config::state::AppState;
use crate::urls::ViewRequest;
use crate::utils::response_handler::{method_not_allowed, HandlerResponse};

const LIST_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::POST];
const DETAIL_METHODS: [Method; 5] = [Method::GET, Method::HEAD, Method::PUT, Method::PATCH, Method::DELETE];

/// Deserializes a JSON body, answering 400 when it is malformed
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, HandlerResponse> {
    serde_json::from_slice::<T>(body).map_err(|err: serde_json::Error| {
        warn!("Rejected request body: {}", err);
        HandlerResponse::new(StatusCode::BAD_REQUEST)
            .data(json!({ "error": "invalid_json", "details": err.to_string() }))
            .message("Malformed JSON body")
    })
}

fn user_response(status: StatusCode, user: &User, message: &str) -> Response {
    HandlerResponse::new(status)
        .data(json!(user))
        .message(message)
        .into_response()
}

/// `/user/`: list users or create one
#[instrument(name = "user_list", skip(state, request), fields(method = %request.method))]
pub async fn user_list(state: AppState, request: ViewRequest) -> Response {
    match request.method {
        Method::GET | Method::HEAD => {
            let users: Vec<User> = state.users.list().await;
            info!("Listing {} users", users.len());

            HandlerResponse::new(StatusCode::OK)
                .data(json!(users))
                .message(format!("{} user(s)", users.len()))
                .into_response()
        }
        Method::POST => {
            let new: NewUser = match parse_body(&request.body) {
                Ok(new) => new,
                Err(rejection) => return rejection.into_response(),
            };

            match state.users.create(new).await {
                Ok(user) => user_response(StatusCode::CREATED, &user, "User created successfully"),
                Err(err) => HandlerResponse::from(err).into_response(),
            }
        }
        _ => method_not_allowed(&request.method, &LIST_METHODS),
    }
}

/// `/users/<pk>/`: retrieve, replace, patch or delete a user
#[instrument(name = "user_detail", skip(state, request), fields(method = %request.method, pk = request.capture("pk").unwrap_or_default()))]
pub async fn user_detail(state: AppState, request: ViewRequest) -> Response {
    if !DETAIL_METHODS.contains(&request.method) {
        return method_not_allowed(&request.method, &DETAIL_METHODS);
    }

    let raw_pk: &str = request.capture("pk").unwrap_or_default();

    // Digits that overflow u64 cannot name a stored user
    let Ok(id) = raw_pk.parse::<u64>() else {
        return HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({ "pk": raw_pk }))
            .message(format!("No user matches pk '{}'", raw_pk))
            .into_response();
    };

    let result: Result<Response, UserError> = match request.method {
        Method::PUT => match parse_body::<NewUser>(&request.body) {
            Ok(new) => state
                .users
                .replace(id, new)
                .await
                .map(|user: User| user_response(StatusCode::OK, &user, "User updated successfully")),
            Err(rejection) => return rejection.into_response(),
        },
        Method::PATCH => match parse_body::<UserPatch>(&request.body) {
            Ok(patch) => state
                .users
                .update(id, patch)
                .await
                .map(|user: User| user_response(StatusCode::OK, &user, "User updated successfully")),
            Err(rejection) => return rejection.into_response(),
        },
        Method::DELETE => state
            .users
            .delete(id)
            .await
            .map(|_| StatusCode::NO_CONTENT.into_response()),
        _ => state
            .users
            .get(id)
            .await
            .map(|user: User| user_response(StatusCode::OK, &user, "User retrieved successfully")),
    };

    result.unwrap_or_else(|err: UserError| HandlerResponse::from(err).into_response())
}
