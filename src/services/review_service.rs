//! Review service - reviews and ratings left on poems.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::validation::check_rating;
use crate::domain::{authorize_mutation, Actor, InsertReview, Review, UpdateReview};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Review a poem as the actor
    async fn create_review(
        &self,
        actor: &Actor,
        poem_id: i32,
        input: InsertReview,
    ) -> AppResult<Review>;

    /// Reviews of one poem, oldest first
    async fn list_reviews(&self, poem_id: i32) -> AppResult<Vec<Review>>;

    async fn get_review(&self, id: i32) -> AppResult<Review>;

    async fn update_review(&self, actor: &Actor, id: i32, input: UpdateReview)
        -> AppResult<Review>;

    async fn delete_review(&self, actor: &Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ReviewService using Unit of Work.
pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_poem_exists(&self, poem_id: i32) -> AppResult<()> {
        self.uow
            .poems()
            .find_by_id(poem_id)
            .await?
            .ok_or_not_found("Poem")
            .map(|_| ())
    }

    async fn find_for_mutation(&self, actor: &Actor, id: i32) -> AppResult<Review> {
        let review = self.get_review(id).await?;
        authorize_mutation(actor, &review).map_err(|denied| {
            tracing::warn!(actor_id = actor.id, review_id = id, "Review mutation refused");
            denied
        })?;
        Ok(review)
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn create_review(
        &self,
        actor: &Actor,
        poem_id: i32,
        input: InsertReview,
    ) -> AppResult<Review> {
        check_rating(input.rating)?;
        self.ensure_poem_exists(poem_id).await?;

        let review = self
            .uow
            .reviews()
            .create(poem_id, actor.id, input)
            .await?
            .ok_or_else(|| AppError::internal("Review row missing after insert"))?;

        tracing::info!(review_id = review.id, poem_id, user_id = actor.id, "Review created");
        Ok(review)
    }

    async fn list_reviews(&self, poem_id: i32) -> AppResult<Vec<Review>> {
        self.ensure_poem_exists(poem_id).await?;
        self.uow.reviews().list_for_poem(poem_id).await
    }

    async fn get_review(&self, id: i32) -> AppResult<Review> {
        self.uow.reviews().find_by_id(id).await?.ok_or_not_found("Review")
    }

    async fn update_review(
        &self,
        actor: &Actor,
        id: i32,
        input: UpdateReview,
    ) -> AppResult<Review> {
        check_rating(input.rating)?;
        self.find_for_mutation(actor, id).await?;

        let review = self
            .uow
            .reviews()
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::internal("Review row missing after update"))?;

        tracing::info!(review_id = id, actor_id = actor.id, "Review updated");
        Ok(review)
    }

    async fn delete_review(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.find_for_mutation(actor, id).await?;

        if !self.uow.reviews().delete(id).await? {
            return Err(AppError::NotFound("Review"));
        }

        tracing::info!(review_id = id, actor_id = actor.id, "Review deleted");
        Ok(())
    }
}
