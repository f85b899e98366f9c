//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over the SeaORM entities
//! - Unit of Work for centralized repository access

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CategoryRepository, CategoryStore, PoemRepository, PoemStore, ReviewRepository, ReviewStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCategoryRepository, MockPoemRepository, MockReviewRepository, MockUserRepository,
};
