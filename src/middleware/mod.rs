//! HTTP middleware for the course API
//!
//! - Basic authentication extractor (`AuthUser`)
//! - Panic isolation and error response normalization
//! - Request span and metrics layers

pub mod auth;
pub mod error_isolation;
pub mod error_response;
pub mod metrics;
pub mod trace;

pub use auth::{parse_basic_credentials, AuthUser};
pub use error_isolation::error_isolation_layer;
pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use trace::RequestMakeSpan;
