//! Sequence-classification heads for cross-encoder checkpoints.
//!
//! Two checkpoint layouts are supported, chosen by `model_type` in `config.json`:
//!
//! - BERT family (`bert`, or no `model_type`): encoder under `bert.*`, then
//!   `bert.pooler.dense` + tanh on the `[CLS]` state, then a `classifier` linear.
//! - RoBERTa family (`roberta`, `xlm-roberta`, `camembert`): encoder under `roberta.*`,
//!   head `classifier.dense` + tanh + `classifier.out_proj`.
//!
//! Both heads must produce exactly one logit per pair.

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{self, BertModel};
use candle_transformers::models::xlm_roberta::{self, XLMRobertaForSequenceClassification};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::constants::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE};
use crate::model::error::RerankerError;

const NUM_LABELS: usize = 1;

const BERT_ENCODER_PREFIX: &str = "bert";

/// Architecture fields read from `config.json` before the full config is parsed.
#[derive(Debug, Deserialize)]
struct ArchitectureHint {
    model_type: Option<String>,
    id2label: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    Roberta,
}

impl Architecture {
    fn from_model_type(model_type: Option<&str>) -> Result<Self, RerankerError> {
        match model_type {
            None | Some("bert") => Ok(Self::Bert),
            Some("roberta" | "xlm-roberta" | "camembert") => Ok(Self::Roberta),
            Some(other) => Err(load_failed(format!(
                "unsupported model_type '{other}' (expected bert, roberta or xlm-roberta)"
            ))),
        }
    }
}

struct BertHead {
    encoder: BertModel,
    pooler: Linear,
    classifier: Linear,
}

impl BertHead {
    fn load(vb: VarBuilder, config: &bert::Config) -> candle_core::Result<Self> {
        let encoder_vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp(BERT_ENCODER_PREFIX)
        } else {
            vb.clone()
        };
        let hidden = config.hidden_size;

        Ok(Self {
            encoder: BertModel::load(encoder_vb.clone(), config)?,
            pooler: candle_nn::linear(hidden, hidden, encoder_vb.pp("pooler").pp("dense"))?,
            classifier: candle_nn::linear(hidden, NUM_LABELS, vb.pp("classifier"))?,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let sequence = self
            .encoder
            .forward(input_ids, type_ids, Some(attention_mask))?;
        let cls = sequence.i((.., 0, ..))?.contiguous()?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        self.classifier.forward(&pooled)
    }
}

enum Head {
    Bert(BertHead),
    Roberta(XLMRobertaForSequenceClassification),
}

/// A loaded sequence classifier. Clones share the weights.
#[derive(Clone)]
pub struct SequenceClassifier {
    head: Arc<Head>,
    architecture: Architecture,
}

impl SequenceClassifier {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load(model_dir: &Path, device: &Device) -> Result<Self, RerankerError> {
        let raw_config = std::fs::read_to_string(model_dir.join(MODEL_CONFIG_FILE))?;
        let hint: ArchitectureHint = parse_config(&raw_config)?;

        if let Some(labels) = &hint.id2label
            && labels.len() != NUM_LABELS
        {
            return Err(load_failed(format!(
                "classifier has {} labels, a cross-encoder needs exactly {NUM_LABELS}",
                labels.len()
            )));
        }

        let architecture = Architecture::from_model_type(hint.model_type.as_deref())?;
        debug!(?architecture, "Resolved classifier architecture");

        let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);
        // SAFETY: the weights file is opened read-only and is not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
            .map_err(|e| load_failed(format!("failed to map {MODEL_WEIGHTS_FILE}: {e}")))?;

        let head = match architecture {
            Architecture::Bert => {
                let config: bert::Config = parse_config(&raw_config)?;
                BertHead::load(vb, &config).map(Head::Bert)
            }
            Architecture::Roberta => {
                let config: xlm_roberta::Config = parse_config(&raw_config)?;
                XLMRobertaForSequenceClassification::new(NUM_LABELS, &config, vb)
                    .map(Head::Roberta)
            }
        }
        .map_err(|e| load_failed(format!("failed to load {architecture:?} weights: {e}")))?;

        Ok(Self {
            head: Arc::new(head),
            architecture,
        })
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Returns logits shaped `(batch, 1)`.
    ///
    /// RoBERTa checkpoints have a single token type, so `type_ids` is ignored for them.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<Tensor> {
        match self.head.as_ref() {
            Head::Bert(head) => head.forward(input_ids, type_ids, attention_mask),
            Head::Roberta(head) => {
                head.forward(input_ids, attention_mask, &input_ids.zeros_like()?)
            }
        }
    }
}

fn parse_config<T: DeserializeOwned>(raw: &str) -> Result<T, RerankerError> {
    serde_json::from_str(raw)
        .map_err(|e| load_failed(format!("failed to parse {MODEL_CONFIG_FILE}: {e}")))
}

fn load_failed(reason: String) -> RerankerError {
    RerankerError::ModelLoadFailed { reason }
}
