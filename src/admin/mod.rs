/*
    * The admin sub-application: a registry of models, filled once by
    * autodiscovery and mounted into the root route table as a sub-table.
*/

pub mod error;
pub mod handler;
pub mod site;

pub use error::AdminError;
pub use site::{AdminSite, ModelAdmin, ModelSource, SourceFuture};
