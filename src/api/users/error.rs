// Errors of the user endpoints and their HTTP mapping

use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::utils::response_handler::HandlerResponse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("A user with username '{0}' already exists.")]
    DuplicateUsername(String),

    #[error("No user with id {0}")]
    NotFound(u64),
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<UserError> for HandlerResponse {
    fn from(err: UserError) -> Self {
        let data: serde_json::Value = match &err {
            UserError::Validation { field, message } => {
                let mut errors: serde_json::Map<String, serde_json::Value> = serde_json::Map::new();
                errors.insert(field.to_string(), json!([message]));
                serde_json::Value::Object(errors)
            }
            UserError::DuplicateUsername(_) => json!({ "username": [err.to_string()] }),
            UserError::NotFound(id) => json!({ "id": id }),
        };

        HandlerResponse::new(err.status_code())
            .data(data)
            .message(err.to_string())
    }
}
