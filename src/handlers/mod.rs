//! HTTP handlers for the user resource.

pub mod users;
pub use users::*;
