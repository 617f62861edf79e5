//! Conversions between protobuf messages and the core data model.

use super::proto;

impl From<proto::RerankRequest> for rerank::RerankRequest {
    fn from(request: proto::RerankRequest) -> Self {
        Self {
            query: request.query,
            documents: request.documents,
        }
    }
}

impl From<rerank::RankedDocument> for proto::RankedDocument {
    fn from(ranked: rerank::RankedDocument) -> Self {
        Self {
            document: ranked.document,
            score: ranked.score,
        }
    }
}

impl From<rerank::RerankResponse> for proto::RerankResponse {
    fn from(response: rerank::RerankResponse) -> Self {
        Self {
            reranked_documents: response
                .reranked_documents
                .into_iter()
                .map(proto::RankedDocument::from)
                .collect(),
        }
    }
}
