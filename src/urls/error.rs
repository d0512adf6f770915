// Errors raised while building route tables

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// The pattern is not a valid regular expression
    #[error("invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The admin site must be autodiscovered before its routes are mounted
    #[error("admin site has not been autodiscovered yet")]
    AdminNotReady,
}
