//! Password hashing.
//!
//! `Password` wraps an Argon2 hash; `PasswordManager` is the seam services
//! depend on so hashing can run off the async workers and be mocked in tests.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Password value object holding an Argon2 hash.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash the plain text with a fresh salt.
    ///
    /// Strength rules are applied before this point by `PasswordPolicy`.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

/// Password primitive used by the user and auth services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PasswordManager: Send + Sync {
    /// Produce a salted hash for storage.
    async fn encrypt(&self, plain_text: &str) -> AppResult<String>;

    /// Check a plain text password against a stored hash.
    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2 implementation running on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Passwords;

#[async_trait]
impl PasswordManager for Argon2Passwords {
    async fn encrypt(&self, plain_text: &str) -> AppResult<String> {
        let plain_text = plain_text.to_owned();
        tokio::task::spawn_blocking(move || Password::new(&plain_text).map(Password::into_string))
            .await
            .map_err(|e| AppError::internal(format!("Password task failed: {}", e)))?
    }

    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let plain_text = plain_text.to_owned();
        let stored = Password::from_hash(hash.to_owned());
        tokio::task::spawn_blocking(move || stored.verify(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("Password task failed: {}", e)))
    }
}
