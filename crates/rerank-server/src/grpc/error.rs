use thiserror::Error;
use tonic::Status;

use crate::pool::PoolError;
use rerank::RankingError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("reranking failed: {0}")]
    RerankFailed(#[from] RankingError),

    #[error("dispatch failed: {0}")]
    DispatchFailed(#[from] PoolError),
}

/// Every failure is `INTERNAL`; the cause is only in the status message.
impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        Status::internal(err.to_string())
    }
}
