//! Poem categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Sonnet")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category creation and rename payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InsertCategory {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Sonnet")]
    pub name: String,
}

pub type UpdateCategory = InsertCategory;
