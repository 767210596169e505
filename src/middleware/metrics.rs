//! Per-request metrics and request ids
//!
//! Every request to the catalogue is counted by method, route shape and
//! status, timed, and tagged with an `x-request-id` that is echoed back to
//! the client. A caller-supplied id is kept as is.

use axum::{body::Body, http::Request, response::Response};
use metrics::{counter, gauge, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUESTS_TOTAL: &str = "course_api_http_requests_total";
const REQUEST_DURATION: &str = "course_api_http_request_duration_seconds";
const REQUESTS_IN_FLIGHT: &str = "course_api_http_requests_in_flight";

/// Wraps the router in [`ObservabilityMiddleware`].
#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = ObservabilityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObservabilityMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for ObservabilityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let method = request.method().to_string();
        let route = route_label(request.uri().path());
        let request_id = request_id_of(&request);

        gauge!(REQUESTS_IN_FLIGHT).increment(1.0);
        let started = Instant::now();

        let mut inner = self.inner.clone();
        let span = tracing::info_span!("http", request_id = %request_id);

        Box::pin(
            async move {
                let result = inner.call(request).await;
                gauge!(REQUESTS_IN_FLIGHT).decrement(1.0);
                let mut response = result?;

                let status = response.status().as_u16().to_string();
                counter!(REQUESTS_TOTAL, "method" => method.clone(), "path" => route.clone(), "status" => status)
                    .increment(1);
                histogram!(REQUEST_DURATION, "method" => method, "path" => route)
                    .record(started.elapsed().as_secs_f64());

                if let Ok(value) = request_id.parse() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

fn request_id_of(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Route shape used as the `path` label: `/courses/17` becomes `/courses/{id}`.
fn route_label(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()) {
                "{id}"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
