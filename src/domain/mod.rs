//! Domain layer - Core business entities and logic
//!
//! Entities, request payloads, the password primitive, validation rules
//! and the access policy. Nothing in here talks to the database.

pub mod category;
pub mod password;
pub mod poem;
pub mod policy;
pub mod review;
pub mod user;
pub mod validation;

pub use category::{Category, InsertCategory, UpdateCategory};
pub use password::{Argon2Passwords, Password, PasswordManager};
pub use poem::{InsertPoem, Poem, PoemDraft, PoemQuery, UpdatePoem};
pub use policy::{authorize_mutation, can_mutate, require_admin, AccessDenied, Actor, Owned};
pub use review::{InsertReview, Ratings, Review, UpdateReview};
pub use user::{InsertNewUser, NewUser, UpdatePassword, UpdateUser, User, UserDto, UserRole};
pub use validation::{PasswordPolicy, RuleViolation};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordManager;
