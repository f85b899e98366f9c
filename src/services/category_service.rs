//! Category service - readable by anyone, managed by admins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::validation::require_text;
use crate::domain::{require_admin, Actor, Category, InsertCategory, UpdateCategory};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create_category(&self, actor: &Actor, input: InsertCategory) -> AppResult<Category>;

    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    async fn get_category(&self, id: i32) -> AppResult<Category>;

    async fn update_category(
        &self,
        actor: &Actor,
        id: i32,
        input: UpdateCategory,
    ) -> AppResult<Category>;

    /// Links to poems go with it; the poems stay.
    async fn delete_category(&self, actor: &Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn authorize(actor: &Actor) -> AppResult<()> {
        require_admin(actor).map_err(|denied| {
            tracing::warn!(actor_id = actor.id, "Category mutation refused");
            AppError::from(denied)
        })
    }

    /// Names are unique; `except` skips the category being renamed.
    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> AppResult<()> {
        match self.uow.categories().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(AppError::conflict(format!("Category '{}'", name)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn create_category(&self, actor: &Actor, input: InsertCategory) -> AppResult<Category> {
        Self::authorize(actor)?;
        require_text("name", &input.name)?;

        let name = input.name.trim().to_string();
        self.ensure_name_free(&name, None).await?;

        let category = self
            .uow
            .categories()
            .create(name)
            .await?
            .ok_or_else(|| AppError::internal("Category row missing after insert"))?;

        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.uow.categories().list().await
    }

    async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Category")
    }

    async fn update_category(
        &self,
        actor: &Actor,
        id: i32,
        input: UpdateCategory,
    ) -> AppResult<Category> {
        Self::authorize(actor)?;
        require_text("name", &input.name)?;
        self.get_category(id).await?;

        let name = input.name.trim().to_string();
        self.ensure_name_free(&name, Some(id)).await?;

        let category = self
            .uow
            .categories()
            .update(id, name)
            .await?
            .ok_or_else(|| AppError::internal("Category row missing after update"))?;

        tracing::info!(category_id = id, "Category renamed");
        Ok(category)
    }

    async fn delete_category(&self, actor: &Actor, id: i32) -> AppResult<()> {
        Self::authorize(actor)?;

        if !self.uow.categories().delete(id).await? {
            return Err(AppError::NotFound("Category"));
        }

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
