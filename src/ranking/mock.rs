//! Deterministic scorers for tests and local development.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::scorer::PairScorer;
use crate::model::RerankerError;

#[derive(Debug, Clone)]
enum Behavior {
    Fixed(Vec<f32>),
    Lookup { scores: HashMap<String, f32>, default: f32 },
    Lexical,
    Fail(String),
}

/// A [`PairScorer`] with scripted output.
#[derive(Debug)]
pub struct MockScorer {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockScorer {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns `scores` verbatim for every call, whatever the documents.
    pub fn fixed(scores: impl Into<Vec<f32>>) -> Self {
        Self::with_behavior(Behavior::Fixed(scores.into()))
    }

    /// Scores each document by exact text lookup, `default` when absent.
    pub fn lookup<I, D>(scores: I, default: f32) -> Self
    where
        I: IntoIterator<Item = (D, f32)>,
        D: Into<String>,
    {
        let scores = scores.into_iter().map(|(d, s)| (d.into(), s)).collect();
        Self::with_behavior(Behavior::Lookup { scores, default })
    }

    /// Scores by word overlap with the query, in `[0, 1]`.
    pub fn lexical() -> Self {
        Self::with_behavior(Behavior::Lexical)
    }

    /// Fails every call with an inference error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(reason.into()))
    }

    /// Number of times [`PairScorer::score_pairs`] was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PairScorer for MockScorer {
    fn score_pairs(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, RerankerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Fixed(scores) => Ok(scores.clone()),
            Behavior::Lookup { scores, default } => Ok(documents
                .iter()
                .map(|d| scores.get(d).copied().unwrap_or(*default))
                .collect()),
            Behavior::Lexical => Ok(documents
                .iter()
                .map(|d| lexical_overlap(query, d))
                .collect()),
            Behavior::Fail(reason) => Err(RerankerError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "to", "of", "in", "for", "on", "with",
    "at", "by", "from", "as", "and", "but", "or", "if", "what", "which", "who", "how", "this",
    "that", "it", "its", "do", "does",
];

fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

fn lexical_overlap(query: &str, document: &str) -> f32 {
    let query_words = content_words(query);
    if query_words.is_empty() {
        return 0.0;
    }

    let document_words = content_words(document);
    let matches = query_words.intersection(&document_words).count();
    let recall = matches as f32 / query_words.len() as f32;

    let union = query_words.union(&document_words).count();
    let jaccard = if union > 0 {
        matches as f32 / union as f32
    } else {
        0.0
    };

    (0.6 * recall + 0.4 * jaccard).clamp(0.0, 1.0)
}
