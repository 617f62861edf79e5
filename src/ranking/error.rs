use thiserror::Error;

use crate::model::RerankerError;

#[derive(Debug, Error)]
/// Errors returned while ranking a request.
pub enum RankingError {
    /// Tokenization or inference error from the scorer.
    #[error("reranker error: {0}")]
    Scorer(#[from] RerankerError),

    /// The scorer did not return exactly one score per document.
    #[error("scorer returned {actual} scores for {expected} documents")]
    ScoreCountMismatch {
        /// Number of documents in the request.
        expected: usize,
        /// Number of scores produced.
        actual: usize,
    },

    /// A NaN score has no place in a descending order. Infinities are accepted.
    #[error("scorer returned NaN for document {index}")]
    NanScore {
        /// Position of the document in the request.
        index: usize,
    },
}
