//! Course API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, post_json, put_json, send_raw, TestAppState,
};
use crate::api::{create_test_course, create_test_user, TEST_EMAIL, TEST_PASSWORD};
use axum::http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const CREDENTIALS: Option<(&str, &str)> = Some((TEST_EMAIL, TEST_PASSWORD));

async fn state_with_user() -> TestAppState {
    let state = TestAppState::new();
    state
        .user_repo
        .add_user(create_test_user(1, TEST_EMAIL, TEST_PASSWORD))
        .await;
    state
}

fn course_payload(user_id: i64) -> Value {
    json!({
        "title": "New Course",
        "description": "My course description",
        "estimatedTime": "3 hours",
        "userId": user_id,
    })
}

// ============================================================================
// Read Tests (anonymous)
// ============================================================================

#[tokio::test]
async fn test_list_courses_is_anonymous() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    state.course_repo.add_course(create_test_course(2, 1)).await;
    let app = build_test_router(state);

    let response = get_json(&app, "/courses", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.unwrap().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_course_returns_camel_case_fields() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state);

    let response = get_json(&app, "/courses/1", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.unwrap(),
        json!({
            "id": 1,
            "title": "Build a Basic Bookcase",
            "description": "High-end furniture projects are great to dream about.",
            "estimatedTime": "12 hours",
            "materialsNeeded": "* 1/2 x 3/4 inch parting strip",
            "userId": 1,
        })
    );
}

#[tokio::test]
async fn test_get_missing_course_returns_404() {
    let app = build_test_router(state_with_user().await);

    let response = get_json(&app, "/courses/99", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.unwrap()["message"].is_string());
}

#[tokio::test]
async fn test_get_non_integer_id_returns_404() {
    let app = build_test_router(state_with_user().await);

    let response = get_json(&app, "/courses/abc", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_course_without_credentials_returns_401() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());

    let response = post_json(&app, "/courses", None, &course_payload(1)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(state.course_repo.count().await, 0);
}

#[tokio::test]
async fn test_create_course_wrong_secret_returns_403() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());

    let response = post_json(
        &app,
        "/courses",
        Some((TEST_EMAIL, "not-the-password")),
        &course_payload(1),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(state.course_repo.count().await, 0);
}

#[tokio::test]
async fn test_create_course_returns_201_with_location() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());

    let response = post_json(&app, "/courses", CREDENTIALS, &course_payload(1)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers[header::LOCATION], "/courses/1");
    assert_eq!(
        response.body.unwrap(),
        json!({ "message": "Course created successfully" })
    );
    assert_eq!(state.course_repo.count().await, 1);
}

#[tokio::test]
async fn test_create_course_validation_errors() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());
    let payload = json!({ "description": "no title", "userId": -1 });

    let response = post_json(&app, "/courses", CREDENTIALS, &payload).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.unwrap(),
        json!({ "errors": [
            "Please provide a value for \"title\"",
            "\"userId\" must be a non-negative integer",
        ] })
    );
    assert_eq!(state.course_repo.count().await, 0);
}

#[tokio::test]
async fn test_create_course_without_body_reports_missing_fields() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());

    let response = send_raw(&app, Method::POST, "/courses", CREDENTIALS, None, "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.unwrap()["errors"].as_array().unwrap().len(),
        3
    );
    assert_eq!(state.course_repo.count().await, 0);
}

#[tokio::test]
async fn test_create_course_for_missing_owner_is_rejected_by_store() {
    let state = state_with_user().await;
    let app = build_test_router(state.clone());

    let response = post_json(&app, "/courses", CREDENTIALS, &course_payload(42)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.body.unwrap();
    assert_eq!(body["name"], "DatabaseError");
    assert!(body["message"].is_string());
    assert_eq!(state.course_repo.count().await, 0);
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_course_returns_204_and_applies_changes() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state);

    let payload = json!({
        "title": "Updated",
        "description": "Updated description",
        "userId": 1,
    });
    let response = put_json(&app, "/courses/1", CREDENTIALS, &payload).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_none());

    let course = get_json(&app, "/courses/1", None).await.body.unwrap();
    assert_eq!(course["title"], "Updated");
    assert_eq!(course["description"], "Updated description");
    // Absent optional fields keep their stored values
    assert_eq!(course["estimatedTime"], "12 hours");
}

#[tokio::test]
async fn test_update_missing_course_is_404_even_with_invalid_payload() {
    let app = build_test_router(state_with_user().await);

    let response = put_json(&app, "/courses/99", CREDENTIALS, &json!({})).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_course_with_empty_body_is_404() {
    let app = build_test_router(state_with_user().await);

    let response = send_raw(&app, Method::PUT, "/courses/99", CREDENTIALS, None, "").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_course_with_malformed_json_is_404() {
    let app = build_test_router(state_with_user().await);

    let response = send_raw(
        &app,
        Method::PUT,
        "/courses/99",
        CREDENTIALS,
        Some("application/json"),
        "{bad",
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_existing_course_with_empty_body_lists_required_fields() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state);

    let response = send_raw(&app, Method::PUT, "/courses/1", CREDENTIALS, None, "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.unwrap(),
        json!({ "errors": [
            "Please provide a value for \"title\"",
            "Please provide a value for \"description\"",
            "Please provide a value for \"userId\"",
        ] })
    );
}

#[tokio::test]
async fn test_update_existing_course_with_invalid_payload_is_400() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state);

    let response = put_json(&app, "/courses/1", CREDENTIALS, &json!({ "title": "" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.body.unwrap()["errors"].as_array().unwrap().len();
    assert_eq!(errors, 3);
}

#[tokio::test]
async fn test_update_without_credentials_returns_401() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state);

    let response = put_json(&app, "/courses/1", None, &course_payload(1)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_missing_course_returns_404() {
    let app = build_test_router(state_with_user().await);

    let response = delete_json(&app, "/courses/5", CREDENTIALS).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_credentials_keeps_course() {
    let state = state_with_user().await;
    state.course_repo.add_course(create_test_course(1, 1)).await;
    let app = build_test_router(state.clone());

    let response = delete_json(&app, "/courses/1", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(state.course_repo.count().await, 1);
}

// ============================================================================
// End-to-end lifecycle
// ============================================================================

#[tokio::test]
async fn test_course_lifecycle() {
    let state = state_with_user().await;
    let app = build_test_router(state);
    let payload = course_payload(1);

    let unauthenticated = post_json(&app, "/courses", None, &payload).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let created = post_json(&app, "/courses", CREDENTIALS, &payload).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let location = created.headers[header::LOCATION].to_str().unwrap().to_string();

    let fetched = get_json(&app, &location, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let course = fetched.body.unwrap();
    assert_eq!(course["title"], payload["title"]);
    assert_eq!(course["description"], payload["description"]);
    assert_eq!(course["estimatedTime"], payload["estimatedTime"]);
    assert_eq!(course["userId"], 1);

    let deleted = delete_json(&app, &location, CREDENTIALS).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = get_json(&app, &location, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
