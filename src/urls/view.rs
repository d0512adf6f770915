// Handler types invoked by the route table

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    body::Bytes,
    http::Method,
    response::{IntoResponse, Response},
};

use super::pattern::Captures;

pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A type-erased endpoint: shared state plus the resolved request in, a response out
pub type RouteHandler<S> = Arc<dyn Fn(S, ViewRequest) -> BoxFuture + Send + Sync>;

/// Everything a view receives once its route has matched
#[derive(Debug, Clone)]
pub struct ViewRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub captures: Captures,
    pub body: Bytes,
}

impl ViewRequest {
    /// Returns a captured path parameter by name
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }
}

/// Wraps an async function into a [`RouteHandler`]
pub fn view<S, F, Fut, R>(f: F) -> RouteHandler<S>
where
    S: 'static,
    F: Fn(S, ViewRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |state: S, request: ViewRequest| -> BoxFuture {
        let fut: Fut = f(state, request);
        Box::pin(async move { fut.await.into_response() })
    })
}
