//! HTTP Server
//!
//! Routing and per-request logging for the life endpoints. Handlers are
//! thin: they decode the request, take the session lock, delegate to the
//! generation service, and render the result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::sync::Mutex;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::service::LifeService;
use crate::state::DensitySink;

pub mod handlers;

/// Shared state handed to every handler.
///
/// The session is guarded by a single mutex: `advance_generation` and
/// `set_density` both read and flip the current-slot index, so concurrent
/// requests must be serialized here.
pub struct AppState {
    pub service: Mutex<LifeService>,
    pub sink: Box<dyn DensitySink>,
}

/// Build the router for the life endpoints.
///
/// `/setstate` also accepts GET so a density can be supplied as a `fill`
/// query parameter without a request body.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/nextstate", get(handlers::next_state))
        .route("/setstate", get(handlers::set_state).post(handlers::set_state))
        .route("/reset", get(handlers::reset))
        .layer(middleware::from_fn(log_requests))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Log method, path, status, and latency for every request.
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "http request"
    );
    response
}
