//! Poems and their write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::category::Category;
use super::policy::Owned;
use super::user::UserDto;

/// A poem with its writer and categories resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    #[schema(example = 5)]
    pub id: i32,
    #[schema(example = "Hope is the thing with feathers")]
    pub title: String,
    pub body: String,
    pub writer: UserDto,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Poem {
    fn owner_id(&self) -> i32 {
        self.writer.id
    }
}

/// Poem creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertPoem {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Hope is the thing with feathers")]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    #[schema(example = "That perches in the soul")]
    pub body: String,
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub category_ids: Vec<i32>,
}

/// Poem update payload; replaces title, body and category links.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoem {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Storage-level poem write, shared by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemDraft {
    pub title: String,
    pub body: String,
    pub category_ids: Vec<i32>,
}

impl PoemDraft {
    fn new(title: String, body: String, mut category_ids: Vec<i32>) -> Self {
        category_ids.sort_unstable();
        category_ids.dedup();
        Self {
            title: title.trim().to_string(),
            body,
            category_ids,
        }
    }
}

impl From<InsertPoem> for PoemDraft {
    fn from(input: InsertPoem) -> Self {
        Self::new(input.title, input.body, input.category_ids)
    }
}

impl From<UpdatePoem> for PoemDraft {
    fn from(input: UpdatePoem) -> Self {
        Self::new(input.title, input.body, input.category_ids)
    }
}

/// Optional filter on the poem listing.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PoemQuery {
    /// Only poems linked to this category; a non-numeric value lists everything
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i32>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
