//! Rerank core library (used by the gRPC and HTTP services and their tests).
//!
//! # Public API Surface
//!
//! ## Ranking
//! - [`Reranker`] - scores documents against a query and returns them best first
//! - [`PairScorer`] - the scoring seam; [`CrossEncoder`] is the production implementation
//! - [`RerankRequest`], [`RerankResponse`], [`RankedDocument`] - the data model shared by
//!   both transports
//!
//! ## Model
//! - [`CrossEncoder`], [`CrossEncoderConfig`] - tokenizer + sequence classifier loaded once
//!   at startup
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `RERANK_*` environment configuration
//!
//! ## Test/Mock Support
//! [`MockScorer`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod model;
pub mod ranking;

pub use config::{Config, ConfigError};
pub use model::{CrossEncoder, CrossEncoderConfig, MAX_SEQ_LEN, RerankerError};
#[cfg(any(test, feature = "mock"))]
pub use ranking::MockScorer;
pub use ranking::{
    PairScorer, RankedDocument, RankingError, RerankRequest, RerankResponse, Reranker,
    rank_by_score,
};
