//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CategoryService, PoemService, ReviewService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub poem_service: Arc<dyn PoemService>,
    pub category_service: Arc<dyn CategoryService>,
    pub review_service: Arc<dyn ReviewService>,
    /// Pinged by the health check; absent when running without a database.
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Build every service over the database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::from_container(&services).with_database(database)
    }

    /// Take services from any container (tests wire in-memory storage here).
    pub fn from_container(container: &dyn ServiceContainer) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            poem_service: container.poems(),
            category_service: container.categories(),
            review_service: container.reviews(),
            database: None,
        }
    }

    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
