/*
    * Route tables: regex patterns, first-match resolution and the
    * handler types they dispatch to.
*/

pub mod error;
pub mod pattern;
pub mod table;
pub mod view;

pub use error::RouteError;
pub use pattern::{Captures, RoutePattern};
pub use table::{Resolved, Route, RouteTable, RouteTarget};
pub use view::{view, BoxFuture, RouteHandler, ViewRequest};
