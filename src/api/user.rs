//! User API handlers

use crate::api::{JsonPayload, MessageResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// List users (authenticated)
pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    tracing::debug!(user_id = auth.id(), "Listing users");
    let users = state.user_service().list().await?;
    Ok(Json(users))
}

/// Create user (anonymous registration)
pub async fn create<S: HasServices>(
    State(state): State<S>,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse> {
    state.user_service().create(&payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/".to_string())],
        Json(MessageResponse::new("User created successfully")),
    ))
}
