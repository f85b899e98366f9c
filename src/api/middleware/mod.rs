//! API middleware.

mod auth;

pub use auth::{admin_middleware, auth_middleware};
