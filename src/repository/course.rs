//! Course repository

use crate::domain::{Course, CourseInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Course>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>>;
    /// Fails with a database error when `user_id` names no user.
    async fn create(&self, input: &CourseInput) -> Result<Course>;
    /// Optional fields left as `None` keep their stored value.
    async fn update(&self, id: i64, input: &CourseInput) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct CourseRepositoryImpl {
    pool: MySqlPool,
}

impl CourseRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for CourseRepositoryImpl {
    async fn list(&self) -> Result<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, estimated_time, materials_needed, user_id
            FROM courses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, estimated_time, materials_needed, user_id
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn create(&self, input: &CourseInput) -> Result<Course> {
        let result = sqlx::query(
            r#"
            INSERT INTO courses (title, description, estimated_time, materials_needed, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.estimated_time)
        .bind(&input.materials_needed)
        .bind(input.user_id)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid course id: {}", e)))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create course")))
    }

    async fn update(&self, id: i64, input: &CourseInput) -> Result<()> {
        // MySQL reports zero affected rows for an unchanged row, so existence
        // is the caller's concern.
        sqlx::query(
            r#"
            UPDATE courses
            SET title = ?,
                description = ?,
                estimated_time = COALESCE(?, estimated_time),
                materials_needed = COALESCE(?, materials_needed),
                user_id = ?,
                updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.estimated_time)
        .bind(&input.materials_needed)
        .bind(input.user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course {} not found", id)));
        }

        Ok(())
    }
}
