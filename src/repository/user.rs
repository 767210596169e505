//! User repository

use crate::domain::{NewUser, User};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    /// Exact, case-sensitive match; the lowest id wins on duplicates.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, input: &NewUser) -> Result<User>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email_address, password
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email_address, password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email_address, password
            FROM users
            WHERE BINARY email_address = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, input: &NewUser) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email_address, password, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email_address)
        .bind(&input.password_hash)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid user id: {}", e)))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }
}
