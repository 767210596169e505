//! HTTP API Handler Tests Infrastructure
//!
//! Key components:
//! - `TestAppState` - in-memory version of AppState implementing `HasServices`
//! - Uses production `build_router()` with `TestAppState` for actual handler coverage
//! - Helper functions for making HTTP requests with optional Basic credentials

pub mod course_http_test;

use crate::api::{TestCourseRepository, TestUserRepository};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use course_api::server::build_router;
use course_api::service::{AuthService, CourseService, UserService};
use course_api::state::HasServices;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test App State
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub user_service: Arc<UserService<TestUserRepository>>,
    pub course_service: Arc<CourseService<TestCourseRepository>>,
    pub auth_service: Arc<AuthService<TestUserRepository>>,
    pub user_repo: Arc<TestUserRepository>,
    pub course_repo: Arc<TestCourseRepository>,
}

impl TestAppState {
    pub fn new() -> Self {
        let user_repo = Arc::new(TestUserRepository::new());
        let course_repo = Arc::new(TestCourseRepository::new(user_repo.clone()));

        Self {
            user_service: Arc::new(UserService::new(user_repo.clone())),
            course_service: Arc::new(CourseService::new(course_repo.clone())),
            auth_service: Arc::new(AuthService::new(user_repo.clone())),
            user_repo,
            course_repo,
        }
    }
}

impl HasServices for TestAppState {
    type UserRepo = TestUserRepository;
    type CourseRepo = TestCourseRepository;

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn course_service(&self) -> &CourseService<Self::CourseRepo> {
        &self.course_service
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    async fn check_ready(&self) -> bool {
        true
    }
}

/// Build a router for HTTP handler tests using the production router.
pub fn build_test_router(state: TestAppState) -> Router {
    build_router(state)
}

// ============================================================================
// HTTP Test Helpers
// ============================================================================

/// Response captured by [`send`]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

pub fn basic_auth(name: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", name, secret)))
}

/// Send a request, optionally with Basic credentials and a JSON body
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    credentials: Option<(&str, &str)>,
    body: Option<&Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((name, secret)) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic_auth(name, secret));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    into_test_response(app.clone().oneshot(request).await.unwrap()).await
}

/// Send a request with a raw body and an optional content type
pub async fn send_raw(
    app: &Router,
    method: Method,
    path: &str,
    credentials: Option<(&str, &str)>,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((name, secret)) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic_auth(name, secret));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    into_test_response(app.clone().oneshot(request).await.unwrap()).await
}

async fn into_test_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    let body = if body_bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&body_bytes).ok()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get_json(app: &Router, path: &str, credentials: Option<(&str, &str)>) -> TestResponse {
    send(app, Method::GET, path, credentials, None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    credentials: Option<(&str, &str)>,
    body: &Value,
) -> TestResponse {
    send(app, Method::POST, path, credentials, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    path: &str,
    credentials: Option<(&str, &str)>,
    body: &Value,
) -> TestResponse {
    send(app, Method::PUT, path, credentials, Some(body)).await
}

pub async fn delete_json(
    app: &Router,
    path: &str,
    credentials: Option<(&str, &str)>,
) -> TestResponse {
    send(app, Method::DELETE, path, credentials, None).await
}

// ============================================================================
// Tests for the router surface
// ============================================================================

#[tokio::test]
async fn test_welcome_message() {
    let app = build_test_router(TestAppState::new());

    let response = get_json(&app, "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.unwrap()["message"],
        "Welcome to the course catalogue API!"
    );
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = build_test_router(TestAppState::new());

    let health = get_json(&app, "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body.unwrap()["status"], "healthy");

    let ready = get_json(&app, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = build_test_router(TestAppState::new());

    let response = get_json(&app, "/nowhere", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body.unwrap()["message"], "Route Not Found");
}

#[tokio::test]
async fn test_malformed_json_is_validated_as_empty_payload() {
    let app = build_test_router(TestAppState::new());

    let response = send_raw(
        &app,
        Method::POST,
        "/users",
        None,
        Some("application/json"),
        "{not json",
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.unwrap()["errors"].as_array().unwrap().len(),
        4
    );
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = build_test_router(TestAppState::new());

    let response = get_json(&app, "/courses", None).await;

    assert!(response.headers.contains_key("x-request-id"));
}
