//! Business validation rules.
//!
//! Structural limits (lengths, ranges) are declared on the DTOs with
//! `validator` and enforced by the `ValidatedJson` extractor. The rules here
//! are the ones whose ordering or wording matters to the caller.

use thiserror::Error;

use super::user::{InsertNewUser, UpdateUser};
use crate::config::{DEFAULT_PASSWORD_MIN_LENGTH, MAX_RATING, MIN_RATING};

/// A violated business rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password is too weak: it needs {}", .0.join(", "))]
    WeakPassword(Vec<&'static str>),

    #[error("New password must differ from the old password")]
    PasswordReused,

    #[error("Old password is incorrect")]
    WrongOldPassword,

    #[error("At least one of firstName or lastName must be provided")]
    EmptyUpdate,

    #[error("Rating must be between {min} and {max}")]
    RatingOutOfRange { min: i32, max: i32 },
}

/// Minimum password strength, configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// Report every unmet requirement at once.
    pub fn check(&self, password: &str) -> Result<(), RuleViolation> {
        let mut missing = Vec::new();

        if password.chars().count() < self.min_length {
            missing.push("more characters");
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            missing.push("an uppercase letter");
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            missing.push("a lowercase letter");
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            missing.push("a digit");
        }
        if self.require_special
            && !password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            missing.push("a special character");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RuleViolation::WeakPassword(missing))
        }
    }

    pub fn is_strong(&self, password: &str) -> bool {
        self.check(password).is_ok()
    }
}

/// Reject blank values for a named field.
pub fn require_text(field: &'static str, value: &str) -> Result<(), RuleViolation> {
    if value.trim().is_empty() {
        Err(RuleViolation::MissingField(field))
    } else {
        Ok(())
    }
}

/// Every registration field must be present and non-blank.
pub fn check_required_fields(input: &InsertNewUser) -> Result<(), RuleViolation> {
    require_text("email", &input.email)?;
    require_text("password", &input.password)?;
    require_text("repeatPassword", &input.repeat_password)?;
    require_text("firstName", &input.first_name)?;
    require_text("lastName", &input.last_name)
}

/// Minimal syntactic check: the address must contain an `@`.
pub fn check_email_shape(email: &str) -> Result<(), RuleViolation> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(RuleViolation::InvalidEmail)
    }
}

pub fn check_passwords_match(password: &str, repeat_password: &str) -> Result<(), RuleViolation> {
    if password == repeat_password {
        Ok(())
    } else {
        Err(RuleViolation::PasswordMismatch)
    }
}

/// Neither the new password nor its repeat may equal the old one.
pub fn check_password_changed(
    old_password: &str,
    password: &str,
    repeat_password: &str,
) -> Result<(), RuleViolation> {
    if password == old_password || repeat_password == old_password {
        Err(RuleViolation::PasswordReused)
    } else {
        Ok(())
    }
}

/// A profile update needs at least one name, and none of them blank.
pub fn check_user_update(update: &UpdateUser) -> Result<(), RuleViolation> {
    if update.first_name.is_none() && update.last_name.is_none() {
        return Err(RuleViolation::EmptyUpdate);
    }
    if let Some(first_name) = &update.first_name {
        require_text("firstName", first_name)?;
    }
    if let Some(last_name) = &update.last_name {
        require_text("lastName", last_name)?;
    }
    Ok(())
}

pub fn check_rating(rating: i32) -> Result<(), RuleViolation> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(RuleViolation::RatingOutOfRange {
            min: MIN_RATING,
            max: MAX_RATING,
        })
    }
}

/// Requested ids that are not in `existing`, deduplicated, in request order.
pub fn unknown_ids(requested: &[i32], existing: &[i32]) -> Vec<i32> {
    let mut unknown = Vec::new();
    for id in requested {
        if !existing.contains(id) && !unknown.contains(id) {
            unknown.push(*id);
        }
    }
    unknown
}
