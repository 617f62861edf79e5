//! Transport bindings for the rerank core.
//!
//! - [`gateway`]: JSON over HTTP (`POST /rerank`, `GET /health`), served by `rerank-http`.
//! - [`grpc`]: `reranker.RerankerService/RerankDocuments`, served by `rerank-grpc`.
//!
//! Both bindings share one loaded [`rerank::Reranker`] per process and only do
//! (de)serialization, dispatch onto a [`pool::WorkerPool`], and error-to-status mapping.

pub mod gateway;
pub mod grpc;
pub mod pool;
pub mod startup;
