//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, each with a SeaORM-backed store and, under
//! `test-utils`, a mockall mock.

mod category_repository;
pub(crate) mod entities;
mod poem_repository;
mod review_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use poem_repository::{PoemRepository, PoemStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use poem_repository::MockPoemRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
