//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod poem;
pub mod poem_category;
pub mod review;
pub mod user;
