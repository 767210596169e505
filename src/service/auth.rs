//! Credential verification for Basic authentication

use crate::crypto::verify_password_blocking;
use crate::domain::User;
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use metrics::counter;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub const UNKNOWN_USER_MESSAGE: &str = "Access denied: no user matches the supplied credentials";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Access denied: password did not match";

/// Name/secret pair decoded from a Basic `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve the user named by `credentials.name` and check the secret.
    ///
    /// Unknown names and wrong secrets are both `Forbidden`.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        let Some(user) = self.repo.find_by_email(&credentials.name).await? else {
            counter!("course_api_auth_attempts_total", "result" => "unknown_user").increment(1);
            warn!("Authentication failed: unknown user");
            return Err(AppError::Forbidden(UNKNOWN_USER_MESSAGE.to_string()));
        };

        let matches =
            verify_password_blocking(credentials.secret.clone(), user.password.clone()).await?;
        if !matches {
            counter!("course_api_auth_attempts_total", "result" => "password_mismatch")
                .increment(1);
            warn!(user_id = user.id, "Authentication failed: password mismatch");
            return Err(AppError::Forbidden(PASSWORD_MISMATCH_MESSAGE.to_string()));
        }

        counter!("course_api_auth_attempts_total", "result" => "success").increment(1);
        info!(user_id = user.id, "Authentication successful");
        Ok(user)
    }
}
