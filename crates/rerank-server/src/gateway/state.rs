use rerank::Reranker;

use crate::pool::WorkerPool;

/// Shared state for the HTTP handlers.
pub struct HandlerState<S> {
    pub reranker: Reranker<S>,

    pub pool: WorkerPool,
}

impl<S> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            reranker: self.reranker.clone(),
            pool: self.pool.clone(),
        }
    }
}

impl<S> HandlerState<S> {
    /// Inference runs off the async workers with no extra concurrency cap.
    pub fn new(reranker: Reranker<S>) -> Self {
        Self::with_pool(reranker, WorkerPool::unbounded())
    }

    pub fn with_pool(reranker: Reranker<S>, pool: WorkerPool) -> Self {
        Self { reranker, pool }
    }
}
