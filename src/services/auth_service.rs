//! Authentication service - token issuance and identity resolution.
//!
//! A token only carries the numeric user id. Every authenticated request
//! re-reads the user, so deleted accounts and role changes take effect
//! immediately rather than at token expiry.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_CLAIM_USER_ID, TOKEN_TYPE_BEARER};
use crate::domain::{require_admin, Actor, PasswordManager, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

// Verifying against this keeps unknown-email logins as slow as real ones.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$2Q0W4M1mJmJ2lU0d1dGVzdGhhc2h2YWx1ZQ";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Kept untyped so a non-numeric id decodes and is then rejected as unauthenticated.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<serde_json::Value>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// The user id claim, if present and an integer that fits an id.
    pub fn user_id(&self) -> Option<i32> {
        self.subject
            .as_ref()?
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and return a signed token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Sign a token for an already authenticated user
    fn issue_token(&self, user: &User) -> AppResult<TokenResponse>;

    /// Check signature, algorithm, issuer, audience and expiry
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Map verified claims to a live user
    async fn resolve_actor(&self, claims: &Claims) -> AppResult<Actor>;

    /// Like `resolve_actor`, but the freshly loaded role must be admin
    async fn resolve_admin(&self, claims: &Claims) -> AppResult<Actor>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    passwords: Arc<dyn PasswordManager>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, passwords: Arc<dyn PasswordManager>, config: Config) -> Self {
        Self {
            uow,
            passwords,
            config,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = email.trim().to_lowercase();
        let user = self.uow.users().find_by_email(&email).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = self.passwords.verify(&password, hash).await?;

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = user.id, "User logged in");
                self.issue_token(&user)
            }
            _ => {
                tracing::warn!("Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            subject: Some(serde_json::Value::from(user.id)),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &self.validation(),
        )?;

        Ok(token_data.claims)
    }

    async fn resolve_actor(&self, claims: &Claims) -> AppResult<Actor> {
        let Some(user_id) = claims.user_id() else {
            tracing::debug!(claim = TOKEN_CLAIM_USER_ID, "Token has no usable user id");
            return Err(AppError::Unauthorized);
        };

        match self.uow.users().find_by_id(user_id).await? {
            Some(user) => Ok(user.actor()),
            None => {
                tracing::warn!(user_id, "Token refers to a user that no longer exists");
                Err(AppError::Unauthorized)
            }
        }
    }

    async fn resolve_admin(&self, claims: &Claims) -> AppResult<Actor> {
        let actor = self.resolve_actor(claims).await?;
        require_admin(&actor).map_err(|denied| {
            tracing::warn!(user_id = actor.id, "Admin route refused");
            AppError::from(denied)
        })?;
        Ok(actor)
    }
}
