//! Query/document ranking on top of a [`PairScorer`].
//!
//! [`Reranker`] asks the scorer for one score per document and returns the documents best
//! first. The ordering is a stable sort on descending score, so documents with equal scores
//! come back in request order.

/// Ranking errors.
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// The reranker and its sort.
pub mod reranker;
/// Scorer trait.
pub mod scorer;
/// Request/response types.
pub mod types;


pub use error::RankingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;
pub use reranker::{Reranker, rank_by_score};
pub use scorer::PairScorer;
pub use types::{RankedDocument, RerankRequest, RerankResponse};
