//! Cross-cutting, shared constants.
//!
//! Defaults here are mirrored by [`Config`](crate::config::Config) and
//! [`CrossEncoderConfig`](crate::model::CrossEncoderConfig); override them through the
//! `RERANK_*` environment variables rather than editing these values.

use std::path::Path;

/// Model artifact directory used when `RERANK_MODEL_PATH` is not set.
pub const DEFAULT_MODEL_PATH: &str = "/app/model";

/// Token budget for a single (query, document) pair.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

pub const DEFAULT_HTTP_PORT: u16 = 8000;

pub const DEFAULT_GRPC_PORT: u16 = 50051;

/// Number of concurrent inference slots for the gRPC service.
pub const DEFAULT_GRPC_WORKERS: usize = 10;

/// How many characters of the query are written to the request log.
pub const QUERY_LOG_PREFIX_CHARS: usize = 50;

pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Body returned by the HTTP liveness probe.
pub const HEALTHY_STATUS: &str = "healthy";

/// Returns the default model directory as a [`Path`].
pub fn default_model_path() -> &'static Path {
    Path::new(DEFAULT_MODEL_PATH)
}

/// Returns at most [`QUERY_LOG_PREFIX_CHARS`] characters of `query` (char boundary safe).
pub fn query_log_prefix(query: &str) -> &str {
    match query.char_indices().nth(QUERY_LOG_PREFIX_CHARS) {
        Some((idx, _)) => &query[..idx],
        None => query,
    }
}
