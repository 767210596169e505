//! Outermost safety net for request handling
//!
//! Propagated failures are already rendered by `AppError`; this module
//! covers the remaining case of a handler panicking, turning it into the
//! same 500 shape instead of tearing down the connection.

use std::any::Any;

use axum::response::Response;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::internal_error_response;

/// Signature of the panic handler used by [`error_isolation_layer`]
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer converting handler panics into uniform 500 responses
pub fn error_isolation_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

/// Map a panic payload to the uniform internal error response
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let description = panic_description(payload.as_ref());
    tracing::error!(panic = %description, "Request handler panicked");
    internal_error_response("Panic", description)
}

fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    }
}
