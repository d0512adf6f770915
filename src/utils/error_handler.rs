// Global error handling for HTTP middleware layers

use axum::{
    BoxError,
    http::StatusCode,
    response::IntoResponse,
};
use std::error::Error;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
// Axum uses http_body_util for length-limiting
use http_body_util::LengthLimitError;
use tracing::warn;

/// Maps errors bubbling out of the tower stack to HTTP status codes
pub async fn handle_global_error(err: BoxError) -> impl IntoResponse {
    status_for_error(&*err)
}

/// 413 for oversized bodies, 408 for timeouts, 500 for everything else
pub fn status_for_error(err: &(dyn Error + 'static)) -> StatusCode {
    if err.is::<LengthLimitError>() || find_cause::<LengthLimitError>(err).is_some() {
        return StatusCode::PAYLOAD_TOO_LARGE;
    }

    if err.is::<Elapsed>() {
        return StatusCode::REQUEST_TIMEOUT;
    }

    warn!("Unhandled middleware error: {}", err);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapper(Box<dyn Error + Send + Sync>);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&*self.0)
        }
    }

    #[test]
    fn timeout_maps_to_408() {
        let err: BoxError = Box::new(Elapsed::new());
        assert_eq!(status_for_error(&*err), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn finds_cause_down_the_chain() {
        let io: std::io::Error = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err: Wrapper = Wrapper(Box::new(io));
        assert!(find_cause::<std::io::Error>(&err).is_some());
        assert!(find_cause::<Elapsed>(&err).is_none());
    }

    #[test]
    fn anything_else_is_500() {
        let err: BoxError = "boom".into();
        assert_eq!(status_for_error(&*err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
