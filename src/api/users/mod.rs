/*
    * The user endpoints: model, in-memory store, list/detail views and
    * their admin registration.
*/

pub mod admin;
pub mod error;
pub mod handler;
pub mod model;
pub mod store;

pub use error::UserError;
pub use model::{NewUser, User, UserPatch};
pub use store::UserStore;
