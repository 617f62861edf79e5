use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pool::PoolError;
use rerank::RankingError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("reranking failed: {0}")]
    RerankFailed(#[from] RankingError),

    #[error("dispatch failed: {0}")]
    DispatchFailed(#[from] PoolError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Every failure is an internal error to the client; the cause is only in the message.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
