//! Custom request extractors.

mod params;
mod validated_json;

pub use params::{ApiQuery, EntityId};
pub use validated_json::ValidatedJson;
