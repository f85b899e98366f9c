//! Unit of Work: one place that hands out every repository.
//!
//! Services hold an `Arc<U: UnitOfWork>` and reach storage only through it,
//! so tests can swap the whole persistence layer at once.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CategoryRepository, CategoryStore, PoemRepository, PoemStore, ReviewRepository, ReviewStore,
    UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn poems(&self) -> Arc<dyn PoemRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn reviews(&self) -> Arc<dyn ReviewRepository>;
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    user_repo: Arc<dyn UserRepository>,
    poem_repo: Arc<dyn PoemRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    review_repo: Arc<dyn ReviewRepository>,
}

impl Persistence {
    /// Stores sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            poem_repo: Arc::new(PoemStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db)),
        }
    }

    /// Assemble from arbitrary repository implementations (mocks, in-memory fakes).
    pub fn from_parts(
        user_repo: Arc<dyn UserRepository>,
        poem_repo: Arc<dyn PoemRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        review_repo: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            user_repo,
            poem_repo,
            category_repo,
            review_repo,
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn poems(&self) -> Arc<dyn PoemRepository> {
        self.poem_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }
}
