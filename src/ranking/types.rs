use serde::{Deserialize, Serialize};

/// A query and the candidate documents to order against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
}

impl RerankRequest {
    pub fn new<Q, I, D>(query: Q, documents: I) -> Self
    where
        Q: Into<String>,
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        Self {
            query: query.into(),
            documents: documents.into_iter().map(Into::into).collect(),
        }
    }
}

/// A document with its raw relevance logit (higher is more relevant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub document: String,
    pub score: f32,
}

/// Documents ordered by descending score; equal scores keep request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    pub reranked_documents: Vec<RankedDocument>,
}

impl RerankResponse {
    pub fn len(&self) -> usize {
        self.reranked_documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reranked_documents.is_empty()
    }

    /// Document texts in ranked order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.reranked_documents.iter().map(|d| d.document.as_str())
    }
}
