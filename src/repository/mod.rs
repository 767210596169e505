//! Data access layer (Repository pattern)

pub mod course;
pub mod user;

pub use course::CourseRepository;
pub use user::UserRepository;

use sqlx::MySqlPool;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    pool: MySqlPool,
}

impl DbPool {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Cheap liveness probe used by the readiness endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
