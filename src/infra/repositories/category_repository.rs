//! Category repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use crate::domain::Category;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// All categories ordered by id
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// The subset of `ids` that exist right now
    async fn existing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>>;

    /// A name that is already taken is a `Conflict`
    async fn create(&self, name: String) -> AppResult<Option<Category>>;

    async fn update(&self, id: i32, name: String) -> AppResult<Option<Category>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn name_taken(name: &str) -> impl FnOnce() -> AppError + '_ {
    move || AppError::conflict(format!("Category '{}'", name))
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(Category::from))
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn existing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = CategoryEntity::find()
            .select_only()
            .column(category::Column::Id)
            .filter(category::Column::Id.is_in(ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        Ok(found)
    }

    async fn create(&self, name: String) -> AppResult<Option<Category>> {
        let now = Utc::now();
        let model = ActiveModel {
            name: Set(name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::unique_or_database(e, name_taken(&name)))?;

        Ok(Some(Category::from(model)))
    }

    async fn update(&self, id: i32, name: String) -> AppResult<Option<Category>> {
        let Some(model) = CategoryEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.name = Set(name.clone());
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::unique_or_database(e, name_taken(&name)))?;
        Ok(Some(Category::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = CategoryEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
