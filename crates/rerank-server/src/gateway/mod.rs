//! HTTP gateway (Axum): `POST /rerank` and `GET /health`.
//!
//! This module is primarily used by the `rerank-http` binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::rerank_handler;
pub use state::HandlerState;

use rerank::PairScorer;
use rerank::constants::HEALTHY_STATUS;

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: PairScorer + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/rerank", post(rerank_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness only: the process is up, so the model is loaded.
#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY_STATUS.to_string(),
    })
}
