/*
    * Server plumbing: logging, request dispatch and the listener lifecycle.
*/

pub mod dispatch;
pub mod logging;
pub mod server;
