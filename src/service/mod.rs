//! Business logic layer

pub mod auth;
pub mod course;
pub mod user;

pub use auth::{AuthService, Credentials};
pub use course::CourseService;
pub use user::UserService;
