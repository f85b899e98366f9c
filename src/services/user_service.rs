//! User service - registration and account management.
//!
//! Registration checks run in a fixed order and stop at the first failure:
//! required fields, email uniqueness, email shape, password match, password
//! strength. Account mutations are allowed to the account owner or an admin.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::validation::{
    check_email_shape, check_password_changed, check_passwords_match, check_required_fields,
    check_user_update,
};
use crate::domain::{
    authorize_mutation, Actor, InsertNewUser, NewUser, PasswordManager, PasswordPolicy,
    RuleViolation, UpdatePassword, UpdateUser, User,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account with the default role
    async fn register(&self, input: InsertNewUser) -> AppResult<User>;

    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Change first and/or last name
    async fn update_user(&self, actor: &Actor, id: i32, update: UpdateUser) -> AppResult<User>;

    /// Change password after proving knowledge of the old one
    async fn update_password(
        &self,
        actor: &Actor,
        id: i32,
        update: UpdatePassword,
    ) -> AppResult<User>;

    /// Delete the account along with its poems and reviews
    async fn delete_user(&self, actor: &Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    passwords: Arc<dyn PasswordManager>,
    policy: PasswordPolicy,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, passwords: Arc<dyn PasswordManager>, policy: PasswordPolicy) -> Self {
        Self {
            uow,
            passwords,
            policy,
        }
    }

    async fn find_for_mutation(&self, actor: &Actor, id: i32) -> AppResult<User> {
        let user = self.uow.users().find_by_id(id).await?.ok_or_not_found("User")?;
        authorize_mutation(actor, &user).map_err(|denied| {
            tracing::warn!(actor_id = actor.id, user_id = id, "User mutation refused");
            denied
        })?;
        Ok(user)
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, input: InsertNewUser) -> AppResult<User> {
        check_required_fields(&input)?;

        let email = input.email.trim().to_lowercase();
        if self.uow.users().email_exists(&email).await? {
            return Err(RuleViolation::EmailTaken.into());
        }
        check_email_shape(&email)?;
        check_passwords_match(&input.password, &input.repeat_password)?;
        self.policy.check(&input.password)?;

        let password_hash = self.passwords.encrypt(&input.password).await?;
        let user = self
            .uow
            .users()
            .create(NewUser {
                email,
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
            })
            .await?
            .ok_or_else(|| AppError::internal("User row missing after insert"))?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn update_user(&self, actor: &Actor, id: i32, update: UpdateUser) -> AppResult<User> {
        check_user_update(&update)?;
        self.find_for_mutation(actor, id).await?;

        let update = UpdateUser {
            first_name: update.first_name.map(|name| name.trim().to_string()),
            last_name: update.last_name.map(|name| name.trim().to_string()),
        };
        let user = self
            .uow
            .users()
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::internal("User row missing after update"))?;

        tracing::info!(user_id = id, actor_id = actor.id, "User updated");
        Ok(user)
    }

    async fn update_password(
        &self,
        actor: &Actor,
        id: i32,
        update: UpdatePassword,
    ) -> AppResult<User> {
        let user = self.find_for_mutation(actor, id).await?;

        check_password_changed(&update.old_password, &update.password, &update.repeat_password)?;
        if !self
            .passwords
            .verify(&update.old_password, &user.password_hash)
            .await?
        {
            return Err(RuleViolation::WrongOldPassword.into());
        }
        check_passwords_match(&update.password, &update.repeat_password)?;
        self.policy.check(&update.password)?;

        let password_hash = self.passwords.encrypt(&update.password).await?;
        let user = self
            .uow
            .users()
            .update_password(id, password_hash)
            .await?
            .ok_or_else(|| AppError::internal("User row missing after password change"))?;

        tracing::info!(user_id = id, actor_id = actor.id, "Password changed");
        Ok(user)
    }

    async fn delete_user(&self, actor: &Actor, id: i32) -> AppResult<()> {
        self.find_for_mutation(actor, id).await?;

        if !self.uow.users().delete(id).await? {
            return Err(AppError::NotFound("User"));
        }

        tracing::info!(user_id = id, actor_id = actor.id, "User deleted");
        Ok(())
    }
}
