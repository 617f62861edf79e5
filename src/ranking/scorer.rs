use crate::model::RerankerError;

/// Scores (query, document) pairs.
///
/// Each document is scored independently of the others. The returned vector holds one score
/// per document, in input order.
pub trait PairScorer: Send + Sync {
    fn score_pairs(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, RerankerError>;
}
