//! Domain models for the course API

pub mod course;
pub mod user;

pub use course::*;
pub use user::*;
