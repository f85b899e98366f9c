//! Reviews and the per-poem rating summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::policy::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lovely imagery")]
    pub body: String,
    #[schema(example = 4)]
    pub rating: i32,
    pub user_id: i32,
    pub poem_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Review {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

/// Review creation and update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InsertReview {
    #[validate(length(max = 2000, message = "Body must be at most 2000 characters"))]
    #[serde(default)]
    #[schema(example = "Lovely imagery")]
    pub body: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
}

pub type UpdateReview = InsertReview;

/// Aggregate of all ratings given to one poem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub total: u32,
    #[schema(example = 4.0)]
    pub average: f64,
    pub five_stars: u32,
    pub four_stars: u32,
    pub three_stars: u32,
    pub two_stars: u32,
    pub one_star: u32,
}

impl Ratings {
    /// Summarize raw rating values. Values outside 1..=5 count toward the
    /// total and average but not toward any star bucket.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let count = |stars: i32| ratings.iter().filter(|r| **r == stars).count() as u32;
        let total = ratings.len() as u32;
        let average = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / f64::from(total)
        };

        Self {
            total,
            average,
            five_stars: count(5),
            four_stars: count(4),
            three_stars: count(3),
            two_stars: count(2),
            one_star: count(1),
        }
    }
}
