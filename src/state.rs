//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`], so the same router serves the
//! production `AppState` and the in-memory state used by tests.

use crate::repository::{CourseRepository, UserRepository};
use crate::service::{AuthService, CourseService, UserService};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository + 'static;
    /// The course repository type
    type CourseRepo: CourseRepository + 'static;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Get the course service
    fn course_service(&self) -> &CourseService<Self::CourseRepo>;

    /// Get the credential verifier
    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    /// Check if the backing store answers
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
