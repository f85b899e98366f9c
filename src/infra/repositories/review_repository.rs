//! Review repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use crate::domain::{InsertReview, Review, UpdateReview};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    /// Reviews of one poem, oldest first
    async fn list_for_poem(&self, poem_id: i32) -> AppResult<Vec<Review>>;

    /// Raw rating values of one poem
    async fn ratings_for_poem(&self, poem_id: i32) -> AppResult<Vec<i32>>;

    async fn create(&self, poem_id: i32, user_id: i32, review: InsertReview) -> AppResult<Option<Review>>;

    async fn update(&self, id: i32, review: UpdateReview) -> AppResult<Option<Review>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Review::from))
    }

    async fn list_for_poem(&self, poem_id: i32) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(review::Column::PoemId.eq(poem_id))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn ratings_for_poem(&self, poem_id: i32) -> AppResult<Vec<i32>> {
        let ratings = ReviewEntity::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::PoemId.eq(poem_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        Ok(ratings)
    }

    async fn create(&self, poem_id: i32, user_id: i32, review: InsertReview) -> AppResult<Option<Review>> {
        let now = Utc::now();
        let model = ActiveModel {
            body: Set(review.body),
            rating: Set(review.rating),
            user_id: Set(user_id),
            poem_id: Set(poem_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(Some(Review::from(model)))
    }

    async fn update(&self, id: i32, review: UpdateReview) -> AppResult<Option<Review>> {
        let Some(model) = ReviewEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.body = Set(review.body);
        active.rating = Set(review.rating);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(Review::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
