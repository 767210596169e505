//! Course catalogue API
//!
//! A REST service for users and the courses they publish, backed by MySQL
//! and protected by HTTP Basic authentication.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
