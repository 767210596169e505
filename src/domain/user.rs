//! User domain model

use crate::error::Result;
use crate::validation::{self, USER_RULES};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::fmt;

/// User entity
///
/// `password` holds the Argon2 PHC hash and is never serialized.
#[derive(Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Public projection of a user (list endpoint)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}

/// Validated input for creating a user; `password` is still plain text here
#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl fmt::Debug for CreateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserInput")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .finish_non_exhaustive()
    }
}

impl CreateUserInput {
    /// Validate a raw request payload and extract the user fields.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        USER_RULES.check(payload)?;
        Ok(Self {
            first_name: validation::required_text(payload, "firstName")?,
            last_name: validation::required_text(payload, "lastName")?,
            email_address: validation::required_text(payload, "emailAddress")?,
            password: validation::required_text(payload, "password")?,
        })
    }
}

/// Row to persist; the secret is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}
