//! Poem service - poem lifecycle, category links and rating summaries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::validation::{require_text, unknown_ids};
use crate::domain::{authorize_mutation, Actor, InsertPoem, Poem, PoemDraft, Ratings, UpdatePoem};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Poem service trait for dependency injection.
#[async_trait]
pub trait PoemService: Send + Sync {
    /// Create a poem written by the actor
    async fn create_poem(&self, actor: &Actor, input: InsertPoem) -> AppResult<Poem>;

    /// All poems, optionally only those linked to one category
    async fn list_poems(&self, category_id: Option<i32>) -> AppResult<Vec<Poem>>;

    async fn get_poem(&self, id: i32) -> AppResult<Poem>;

    /// Replace title, body and category links
    async fn update_poem(&self, actor: &Actor, id: i32, input: UpdatePoem) -> AppResult<Poem>;

    async fn delete_poem(&self, actor: &Actor, id: i32) -> AppResult<()>;

    /// Rating summary over the poem's reviews
    async fn get_ratings(&self, id: i32) -> AppResult<Ratings>;
}

/// Concrete implementation of PoemService using Unit of Work.
pub struct PoemManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PoemManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn check_draft(draft: &PoemDraft) -> AppResult<()> {
        require_text("title", &draft.title)?;
        require_text("body", &draft.body)?;
        Ok(())
    }

    /// Every requested category must exist; the error names each missing id.
    async fn ensure_categories_exist(&self, ids: &[i32]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let existing = self.uow.categories().existing_ids(ids).await?;
        let unknown = unknown_ids(ids, &existing);
        if unknown.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?unknown, "Poem references unknown categories");
            Err(AppError::UnknownCategories(unknown))
        }
    }

    async fn find_for_mutation(&self, actor: &Actor, id: i32) -> AppResult<Poem> {
        let poem = self.uow.poems().find_by_id(id).await?.ok_or_not_found("Poem")?;
        authorize_mutation(actor, &poem).map_err(|denied| {
            tracing::warn!(actor_id = actor.id, poem_id = id, "Poem mutation refused");
            denied
        })?;
        Ok(poem)
    }
}

#[async_trait]
impl<U: UnitOfWork> PoemService for PoemManager<U> {
    async fn create_poem(&self, actor: &Actor, input: InsertPoem) -> AppResult<Poem> {
        let draft = PoemDraft::from(input);
        Self::check_draft(&draft)?;
        self.ensure_categories_exist(&draft.category_ids).await?;

        let poem = self
            .uow
            .poems()
            .create(actor.id, draft)
            .await?
            .ok_or_else(|| AppError::internal("Poem row missing after insert"))?;

        tracing::info!(poem_id = poem.id, writer_id = actor.id, "Poem created");
        Ok(poem)
    }

    async fn list_poems(&self, category_id: Option<i32>) -> AppResult<Vec<Poem>> {
        self.uow.poems().list(category_id).await
    }

    async fn get_poem(&self, id: i32) -> AppResult<Poem> {
        self.uow.poems().find_by_id(id).await?.ok_or_not_found("Poem")
    }

    async fn update_poem(&self, actor: &Actor, id: i32, input: UpdatePoem) -> AppResult<Poem> {
        let draft = PoemDraft::from(input);
        Self::check_draft(&draft)?;
        self.find_for_mutation(actor, id).await?;
        self.ensure_categories_exist(&draft.category_ids).await?;

        let poem = self
            .uow
            .poems()
            .update(id, draft)
            .await?
            .ok_or_else(|| AppError::internal("Poem row missing after update"))?;

        tracing::info!(poem_id = id, actor_id = actor.id, "Poem updated");
        Ok(poem)
    }

    async fn delete_poem(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.find_for_mutation(actor, id).await?;

        if !self.uow.poems().delete(id).await? {
            return Err(AppError::NotFound("Poem"));
        }

        tracing::info!(poem_id = id, actor_id = actor.id, "Poem deleted");
        Ok(())
    }

    async fn get_ratings(&self, id: i32) -> AppResult<Ratings> {
        let ratings = self.uow.reviews().ratings_for_poem(id).await?;
        Ok(Ratings::from_ratings(&ratings))
    }
}
