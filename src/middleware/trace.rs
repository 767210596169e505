//! Custom TraceLayer span maker
//!
//! Logs the path without its query string and reserves a `user_id` field
//! that the Basic authentication extractor fills in once a caller is
//! verified.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// A `MakeSpan` implementation producing one `request` span per request.
#[derive(Clone, Debug, Default)]
pub struct RequestMakeSpan;

impl<B> MakeSpan<B> for RequestMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
            user_id = tracing::field::Empty,
        )
    }
}
