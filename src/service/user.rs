//! User business logic

use crate::crypto::hash_password_blocking;
use crate::domain::{CreateUserInput, NewUser, User, UserProfile};
use crate::error::Result;
use crate::repository::UserRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All users, without their password hashes
    pub async fn list(&self) -> Result<Vec<UserProfile>> {
        let users = self.repo.list().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Validate, hash the secret, persist.
    pub async fn create(&self, payload: &Value) -> Result<User> {
        let input = CreateUserInput::from_payload(payload)?;
        let password_hash = hash_password_blocking(input.password).await?;

        let user = self
            .repo
            .create(&NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email_address: input.email_address,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }
}
