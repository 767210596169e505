//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{
    error_isolation_layer, normalize_error_response, ObservabilityLayer, RequestMakeSpan,
};
use crate::migration;
use crate::repository::{course::CourseRepositoryImpl, user::UserRepositoryImpl, DbPool};
use crate::service::{AuthService, CourseService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub course_service: Arc<CourseService<CourseRepositoryImpl>>,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> Self {
        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.inner().clone()));
        let course_repo = Arc::new(CourseRepositoryImpl::new(db_pool.inner().clone()));

        Self {
            user_service: Arc::new(UserService::new(user_repo.clone())),
            course_service: Arc::new(CourseService::new(course_repo)),
            auth_service: Arc::new(AuthService::new(user_repo)),
            db_pool,
        }
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type CourseRepo = CourseRepositoryImpl;

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
        self.db_pool.ping().await
    }
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    if config.run_migrations {
        migration::run_migrations(&config).await?;
    }

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let metrics_enabled = prometheus_handle.is_some();
    let state = AppState::new(DbPool::new(pool));

    let mut app = build_router(state);
    if metrics_enabled {
        app = app.merge(api::metrics::metrics_router(prometheus_handle));
    }

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Build the HTTP router
///
/// Layers, innermost first: error normalization, panic isolation, the
/// request span, request metrics, CORS.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::welcome))
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // User endpoints
        .route(
            "/users",
            get(api::user::list::<S>).post(api::user::create::<S>),
        )
        // Course endpoints
        .route(
            "/courses",
            get(api::course::list::<S>).post(api::course::create::<S>),
        )
        .route(
            "/courses/{id}",
            get(api::course::get::<S>)
                .put(api::course::update::<S>)
                .delete(api::course::delete::<S>),
        )
        .fallback(api::route_not_found)
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(error_isolation_layer())
        .layer(TraceLayer::new_for_http().make_span_with(RequestMakeSpan))
        .layer(ObservabilityLayer)
        .layer(cors)
        .with_state(state)
}
