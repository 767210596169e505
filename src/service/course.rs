//! Course business logic
//!
//! Any authenticated caller may modify any course; ownership is recorded
//! through `userId` but not enforced here.

use crate::domain::{Course, CourseInput};
use crate::error::{AppError, Result};
use crate::repository::CourseRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub struct CourseService<R: CourseRepository> {
    repo: Arc<R>,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Course>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Course> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, payload: &Value) -> Result<Course> {
        let input = CourseInput::from_payload(payload)?;
        let course = self.repo.create(&input).await?;
        info!(course_id = course.id, user_id = course.user_id, "Course created");
        Ok(course)
    }

    /// Existence is checked before the payload is validated.
    pub async fn update(&self, id: i64, payload: &Value) -> Result<()> {
        self.get(id).await?;
        let input = CourseInput::from_payload(payload)?;
        self.repo.update(id, &input).await?;
        info!(course_id = id, "Course updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        info!(course_id = id, "Course deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Course {} not found", id))
}
