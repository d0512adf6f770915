// Errors raised while populating the admin site

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("model '{app_label}.{model_name}' is already registered")]
    AlreadyRegistered { app_label: String, model_name: String },
}
