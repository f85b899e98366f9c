//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate validation, the access policy and the repositories.
//! They depend on traits only, so every one of them can run against mocks.

mod auth_service;
mod category_service;
pub mod container;
mod poem_service;
mod review_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use category_service::{CategoryManager, CategoryService};
pub use poem_service::{PoemManager, PoemService};
pub use review_service::{ReviewManager, ReviewService};
pub use user_service::{UserManager, UserService};
