//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::policy::{Actor, Owned};
use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Request-scoped identity for this user.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

impl Owned for User {
    fn owner_id(&self) -> i32 {
        self.id
    }
}

/// Registration payload.
///
/// Missing fields deserialize to empty strings so the required-field rule
/// can report them instead of a generic parse failure.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InsertNewUser {
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    #[schema(example = "Str0ng!Pass")]
    pub password: String,
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    #[schema(example = "Str0ng!Pass")]
    pub repeat_password: String,
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    #[schema(example = "Emily")]
    pub first_name: String,
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    #[schema(example = "Dickinson")]
    pub last_name: String,
}

impl std::fmt::Debug for InsertNewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertNewUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("repeat_password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Registration data after the password has been encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile update payload; at least one field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    #[schema(example = "Emily")]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    #[schema(example = "Brontë")]
    pub last_name: Option<String>,
}

/// Password change payload
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePassword {
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub old_password: String,
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub repeat_password: String,
}

impl std::fmt::Debug for UpdatePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UpdatePassword([REDACTED])")
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(example = "Emily")]
    pub first_name: String,
    #[schema(example = "Dickinson")]
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
