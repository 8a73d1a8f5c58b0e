//! HTTP adapters - REST API implementations.
//!
//! [`api_router`] assembles the public router: the voting endpoints under
//! `/votacao`, a liveness check at `/health`, and the shared middleware
//! stack (request ids, tracing, timeout, CORS).

pub mod voting;

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use voting::{voting_routes, VotingHandlers};

/// Builds the application router.
pub fn api_router(handlers: VotingHandlers, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/votacao", voting_routes(handlers))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

async fn health() -> StatusCode {
    StatusCode::OK
}
