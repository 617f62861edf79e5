use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use super::error::RankingError;
use super::scorer::PairScorer;
use super::types::{RankedDocument, RerankRequest, RerankResponse};
use crate::constants::query_log_prefix;

/// Orders documents by relevance using a shared [`PairScorer`].
///
/// The scorer is loaded once and shared read-only; cloning a `Reranker` only bumps the
/// reference count.
pub struct Reranker<S> {
    scorer: Arc<S>,
}

impl<S> Clone for Reranker<S> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}

impl<S> std::fmt::Debug for Reranker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("scorer", &std::any::type_name::<S>())
            .finish()
    }
}

impl<S: PairScorer> Reranker<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }

    pub fn from_shared(scorer: Arc<S>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Scores every document against the query and returns them best first.
    ///
    /// Either every document comes back ranked or an error is returned; there is no partial
    /// result.
    pub fn rerank(&self, request: RerankRequest) -> Result<RerankResponse, RankingError> {
        let start = Instant::now();
        let RerankRequest { query, documents } = request;

        info!(
            query = %query_log_prefix(&query),
            num_documents = documents.len(),
            "Received rerank request"
        );

        if documents.is_empty() {
            debug!("No documents to rerank");
            return Ok(RerankResponse::default());
        }

        let ranked = self
            .scorer
            .score_pairs(&query, &documents)
            .map_err(RankingError::from)
            .and_then(|scores| rank_by_score(documents, scores));

        match ranked {
            Ok(reranked_documents) => {
                info!(
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    top_score = reranked_documents.first().map(|d| d.score),
                    "Reranking completed"
                );
                Ok(RerankResponse { reranked_documents })
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_debug = ?e,
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Error during reranking"
                );
                Err(e)
            }
        }
    }
}

/// Pairs documents with their scores and stable-sorts them by descending score.
///
/// `scores[i]` belongs to `documents[i]`. Equal scores (including `0.0` and `-0.0`) keep their
/// input order. NaN scores are rejected.
pub fn rank_by_score(
    documents: Vec<String>,
    scores: Vec<f32>,
) -> Result<Vec<RankedDocument>, RankingError> {
    if scores.len() != documents.len() {
        return Err(RankingError::ScoreCountMismatch {
            expected: documents.len(),
            actual: scores.len(),
        });
    }

    if let Some(index) = scores.iter().position(|s| s.is_nan()) {
        return Err(RankingError::NanScore { index });
    }

    let mut ranked: Vec<RankedDocument> = documents
        .into_iter()
        .zip(scores)
        .map(|(document, score)| RankedDocument { document, score })
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(ranked)
}
