//! Cross-encoder model loading and batched pair inference.
//!
//! - [`cross_encoder`] owns the loaded tokenizer and classifier and scores pairs.
//! - [`classifier`] holds the BERT and RoBERTa sequence-classification heads.
//! - [`device`] picks CPU / Metal / CUDA from cargo features.

/// BERT / RoBERTa sequence classifiers.
pub mod classifier;
/// Cross-encoder (tokenizer + classifier) used by [`crate::ranking`].
pub mod cross_encoder;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod tokenizer;

pub use cross_encoder::{CrossEncoder, CrossEncoderConfig, MAX_SEQ_LEN};
pub use error::RerankerError;
