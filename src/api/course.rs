//! Course API handlers

use crate::api::{JsonPayload, MessageResponse};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Path ids that are not integers cannot name a stored course.
fn parse_course_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("Course {} not found", raw)))
}

/// List all courses
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let courses = state.course_service().list().await?;
    Ok(Json(courses))
}

/// Get course by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_course_id(&id)?;
    let course = state.course_service().get(id).await?;
    Ok(Json(course))
}

/// Create course
pub async fn create<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse> {
    let course = state.course_service().create(&payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/courses/{}", course.id))],
        Json(MessageResponse::new("Course created successfully")),
    ))
}

/// Update course
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse> {
    let id = parse_course_id(&id)?;
    tracing::debug!(user_id = auth.id(), course_id = id, "Updating course");
    state.course_service().update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete course
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_course_id(&id)?;
    tracing::debug!(user_id = auth.id(), course_id = id, "Deleting course");
    state.course_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
