//! Error response normalization middleware
//!
//! Framework-level rejections (method not allowed, unreadable or oversized
//! bodies) come back as text/plain. This rewrites them to the
//! `{ "message": ... }` JSON shape used by every other client error.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{internal_error_response, AppError};

/// Middleware that normalizes all error responses to consistent JSON format.
pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let uri = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();

    // Probe endpoints return their own plain-text responses
    if uri == "/health" || uri == "/ready" || uri == "/metrics" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") {
        return response;
    }

    tracing::debug!(status = %status, path = %uri, "Normalizing framework error response");
    generic_error_response(status)
}

fn generic_error_response(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::BAD_REQUEST => "Invalid request body",
        StatusCode::NOT_FOUND => "Route Not Found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        _ if status.is_client_error() => "Client error",
        _ => {
            return internal_error_response(
                "InternalError",
                status.canonical_reason().unwrap_or("Unknown").to_string(),
            )
        }
    };

    match status {
        StatusCode::BAD_REQUEST => AppError::BadRequest(message.to_string()).into_response(),
        _ => (status, axum::Json(serde_json::json!({ "message": message }))).into_response(),
    }
}
