use tonic::{Request, Response, Status};
use tracing::{debug, error};

use super::error::ServiceError;
use super::proto;
use super::proto::reranker_service_server::RerankerService;
use crate::pool::WorkerPool;
use rerank::{PairScorer, RerankRequest, Reranker};

/// `RerankerService` implementation dispatching onto a bounded [`WorkerPool`].
pub struct RerankerGrpcService<S> {
    reranker: Reranker<S>,
    pool: WorkerPool,
}

impl<S> RerankerGrpcService<S> {
    /// `workers` concurrent inference calls at most.
    pub fn new(reranker: Reranker<S>, workers: usize) -> Self {
        Self::with_pool(reranker, WorkerPool::bounded(workers))
    }

    pub fn with_pool(reranker: Reranker<S>, pool: WorkerPool) -> Self {
        Self { reranker, pool }
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

impl<S: PairScorer + 'static> RerankerGrpcService<S> {
    async fn rerank(&self, request: RerankRequest) -> Result<proto::RerankResponse, ServiceError> {
        let reranker = self.reranker.clone();
        let response = self
            .pool
            .run(move || reranker.rerank(request))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to dispatch rerank request"))??;

        Ok(response.into())
    }
}

#[tonic::async_trait]
impl<S: PairScorer + 'static> RerankerService for RerankerGrpcService<S> {
    async fn rerank_documents(
        &self,
        request: Request<proto::RerankRequest>,
    ) -> Result<Response<proto::RerankResponse>, Status> {
        debug!(remote_addr = ?request.remote_addr(), "RerankDocuments called");
        let request = RerankRequest::from(request.into_inner());

        let response = self.rerank(request).await?;

        Ok(Response::new(response))
    }
}
