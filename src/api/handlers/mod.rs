//! HTTP request handlers.

pub mod auth_handler;
pub mod category_handler;
pub mod poem_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use category_handler::category_routes;
pub use poem_handler::poem_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;
