pub mod config;

#[cfg(test)]
mod tests;

pub use config::{CrossEncoderConfig, MAX_SEQ_LEN};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::constants::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE, TOKENIZER_FILE};
use crate::model::classifier::SequenceClassifier;
use crate::model::device::select_device;
use crate::model::error::RerankerError;
use crate::model::tokenizer::load_pair_tokenizer;
use crate::ranking::PairScorer;

/// A loaded cross-encoder: tokenizer plus sequence classifier on one device.
///
/// Immutable after [`CrossEncoder::load`]; share it behind an `Arc`.
pub struct CrossEncoder {
    device: Device,
    config: CrossEncoderConfig,
    model: SequenceClassifier,
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .finish()
    }
}

impl CrossEncoder {
    pub fn load(config: CrossEncoderConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let model_path = &config.model_path;
        if !model_path.exists() {
            return Err(RerankerError::ModelNotFound {
                path: model_path.clone(),
            });
        }

        for required in [MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE, TOKENIZER_FILE] {
            if !model_path.join(required).exists() {
                return Err(RerankerError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        let device = select_device();
        debug!(?device, "Selected compute device for cross-encoder");

        info!(
            model_path = %model_path.display(),
            max_seq_len = config.max_seq_len,
            "Loading tokenizer and model"
        );

        let model = SequenceClassifier::load(model_path, &device)?;
        debug!(architecture = ?model.architecture(), "Loaded sequence classifier");

        let tokenizer = load_pair_tokenizer(model_path, config.max_seq_len).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!("Tokenizer and model loaded successfully");

        Ok(Self {
            device,
            config,
            model,
            tokenizer,
        })
    }

    /// Scores every (query, document) pair in one padded batch.
    ///
    /// Returns one raw logit per document, in input order.
    pub fn score_pairs(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, RerankerError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<(&str, &str)> = documents
            .iter()
            .map(|document| (query, document.as_str()))
            .collect();

        let encodings = self.tokenizer.encode_batch(pairs, true).map_err(|e| {
            RerankerError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let batch_size = encodings.len();
        let seq_len = encodings.first().map_or(0, |e| e.get_ids().len());

        debug!(batch_size, seq_len, "Encoded pair batch");

        let mut input_ids = Vec::with_capacity(batch_size * seq_len);
        let mut type_ids = Vec::with_capacity(batch_size * seq_len);
        let mut attention_mask = Vec::with_capacity(batch_size * seq_len);
        for encoding in &encodings {
            input_ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            attention_mask.extend_from_slice(encoding.get_attention_mask());
        }

        let shape = (batch_size, seq_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device)?;
        let type_ids = Tensor::from_vec(type_ids, shape, &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, shape, &self.device)?;

        let logits = self
            .model
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| RerankerError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let scores = logits.flatten_all()?.to_vec1::<f32>()?;

        if scores.len() != batch_size {
            return Err(RerankerError::InferenceFailed {
                reason: format!(
                    "model produced {} logits for {} pairs",
                    scores.len(),
                    batch_size
                ),
            });
        }

        Ok(scores)
    }

    pub fn config(&self) -> &CrossEncoderConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl PairScorer for CrossEncoder {
    fn score_pairs(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, RerankerError> {
        CrossEncoder::score_pairs(self, query, documents)
    }
}
