use axum::{Json, extract::State};
use tracing::{error, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use rerank::{PairScorer, RerankRequest, RerankResponse};

#[instrument(skip(state, request), fields(num_documents = tracing::field::Empty))]
pub async fn rerank_handler<S>(
    State(state): State<HandlerState<S>>,
    Json(request): Json<RerankRequest>,
) -> Result<Json<RerankResponse>, GatewayError>
where
    S: PairScorer + 'static,
{
    tracing::Span::current().record("num_documents", request.documents.len() as u64);

    let reranker = state.reranker.clone();
    let response = state
        .pool
        .run(move || reranker.rerank(request))
        .await
        .inspect_err(|e| error!(error = %e, "Failed to dispatch rerank request"))??;

    Ok(Json(response))
}
