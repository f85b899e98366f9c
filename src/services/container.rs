//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through the container; the concrete
//! services are wired once here over a shared Unit of Work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CategoryManager, CategoryService, PoemManager, PoemService,
    ReviewManager, ReviewService, UserManager, UserService,
};
use crate::config::Config;
use crate::domain::{Argon2Passwords, PasswordManager};
use crate::infra::{Persistence, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn poems(&self) -> Arc<dyn PoemService>;

    fn categories(&self) -> Arc<dyn CategoryService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    poem_service: Arc<dyn PoemService>,
    category_service: Arc<dyn CategoryService>,
    review_service: Arc<dyn ReviewService>,
}

impl Services {
    /// Wire every service over one Unit of Work and password primitive.
    pub fn new<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        passwords: Arc<dyn PasswordManager>,
        config: Config,
    ) -> Self {
        let policy = config.password_policy.clone();

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), passwords.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone(), passwords, policy)),
            poem_service: Arc::new(PoemManager::new(uow.clone())),
            category_service: Arc::new(CategoryManager::new(uow.clone())),
            review_service: Arc::new(ReviewManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::new(
            Arc::new(Persistence::new(db)),
            Arc::new(Argon2Passwords),
            config,
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn poems(&self) -> Arc<dyn PoemService> {
        self.poem_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }
}
