//! Poem repository implementation.
//!
//! A poem row plus its category links are written in one transaction.
//! Reads resolve the writer and categories in batched queries.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::poem::{self, ActiveModel, Entity as PoemEntity};
use super::entities::poem_category::{self, Entity as PoemCategoryEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Category, Poem, PoemDraft, UserDto};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PoemRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Poem>>;

    /// All poems, optionally only those linked to `category_id`
    async fn list(&self, category_id: Option<i32>) -> AppResult<Vec<Poem>>;

    async fn create(&self, writer_id: i32, draft: PoemDraft) -> AppResult<Option<Poem>>;

    /// Replace title, body and category links
    async fn update(&self, id: i32, draft: PoemDraft) -> AppResult<Option<Poem>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

pub struct PoemStore {
    db: DatabaseConnection,
}

impl PoemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PoemRepository for PoemStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Poem>> {
        let Some(model) = PoemEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(hydrate(&self.db, vec![model]).await?.pop())
    }

    async fn list(&self, category_id: Option<i32>) -> AppResult<Vec<Poem>> {
        let mut query = PoemEntity::find().order_by_asc(poem::Column::Id);

        if let Some(category_id) = category_id {
            let poem_ids: Vec<i32> = PoemCategoryEntity::find()
                .filter(poem_category::Column::CategoryId.eq(category_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|link| link.poem_id)
                .collect();

            if poem_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(poem::Column::Id.is_in(poem_ids));
        }

        let models = query.all(&self.db).await?;
        hydrate(&self.db, models).await
    }

    async fn create(&self, writer_id: i32, draft: PoemDraft) -> AppResult<Option<Poem>> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = ActiveModel {
            title: Set(draft.title),
            body: Set(draft.body),
            writer_id: Set(writer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        replace_categories(&txn, model.id, &draft.category_ids).await?;
        let poem = hydrate(&txn, vec![model]).await?.pop();

        txn.commit().await?;
        Ok(poem)
    }

    async fn update(&self, id: i32, draft: PoemDraft) -> AppResult<Option<Poem>> {
        let txn = self.db.begin().await?;

        let Some(model) = PoemEntity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.title = Set(draft.title);
        active.body = Set(draft.body);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        replace_categories(&txn, id, &draft.category_ids).await?;
        let poem = hydrate(&txn, vec![model]).await?.pop();

        txn.commit().await?;
        Ok(poem)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        // Category links and reviews go with it (ON DELETE CASCADE).
        let result = PoemEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

async fn replace_categories<C: ConnectionTrait>(
    db: &C,
    poem_id: i32,
    category_ids: &[i32],
) -> AppResult<()> {
    PoemCategoryEntity::delete_many()
        .filter(poem_category::Column::PoemId.eq(poem_id))
        .exec(db)
        .await?;

    if category_ids.is_empty() {
        return Ok(());
    }

    let links = category_ids.iter().map(|category_id| poem_category::ActiveModel {
        poem_id: Set(poem_id),
        category_id: Set(*category_id),
    });
    PoemCategoryEntity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Attach writers and categories to poem rows, preserving row order.
async fn hydrate<C: ConnectionTrait>(db: &C, models: Vec<poem::Model>) -> AppResult<Vec<Poem>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let poem_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let writer_ids: Vec<i32> = models.iter().map(|m| m.writer_id).collect();

    let writers: HashMap<i32, UserDto> = UserEntity::find()
        .filter(user::Column::Id.is_in(writer_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, UserDto::from(m)))
        .collect();

    let links = PoemCategoryEntity::find()
        .filter(poem_category::Column::PoemId.is_in(poem_ids))
        .all(db)
        .await?;

    let category_ids: Vec<i32> = links.iter().map(|l| l.category_id).collect();
    let categories: HashMap<i32, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        CategoryEntity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, Category::from(m)))
            .collect()
    };

    models
        .into_iter()
        .map(|model| {
            let writer = writers.get(&model.writer_id).cloned().ok_or_else(|| {
                AppError::internal(format!(
                    "Poem {} references missing writer {}",
                    model.id, model.writer_id
                ))
            })?;

            let mut poem_categories: Vec<Category> = links
                .iter()
                .filter(|link| link.poem_id == model.id)
                .filter_map(|link| categories.get(&link.category_id).cloned())
                .collect();
            poem_categories.sort_by_key(|c| c.id);

            Ok(Poem {
                id: model.id,
                title: model.title,
                body: model.body,
                writer,
                categories: poem_categories,
                created_at: model.created_at,
                updated_at: model.updated_at,
            })
        })
        .collect()
}
