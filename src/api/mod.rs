//! REST API handlers and shared response types

pub mod course;
pub mod health;
pub mod metrics;
pub mod user;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message response (welcome, create confirmations, route errors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request body read as loose JSON
///
/// The content type is not checked. An empty or unparseable body becomes an
/// empty object, so missing fields are reported by the rule set and the
/// handler still runs its own checks (course existence) first.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self(parse_payload(&bytes)))
    }
}

fn parse_payload(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Request body is not JSON, treating as empty");
        Value::Object(Map::new())
    })
}

/// GET / — welcome message
pub async fn welcome() -> impl IntoResponse {
    Json(MessageResponse::new("Welcome to the course catalogue API!"))
}

/// Fallback for unknown routes
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Route Not Found")),
    )
}
