use super::*;
use crate::model::classifier::tests::{write_bert_checkpoint, write_roberta_checkpoint};
use crate::model::tokenizer::tests::write_tokenizer;
use crate::ranking::{RerankRequest, Reranker};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_placeholder_artifacts(dir: &Path) {
    std::fs::write(dir.join(MODEL_CONFIG_FILE), "{ \"not\": \"a bert config\" }").unwrap();
    std::fs::write(dir.join(MODEL_WEIGHTS_FILE), b"").unwrap();
    write_tokenizer(dir);
}

fn load_bert_encoder(head_bias: Option<f32>) -> (TempDir, CrossEncoder) {
    let dir = TempDir::new().unwrap();
    write_bert_checkpoint(dir.path(), head_bias);
    write_tokenizer(dir.path());

    let encoder = CrossEncoder::load(CrossEncoderConfig::new(dir.path())).unwrap();
    (dir, encoder)
}

fn docs(documents: &[&str]) -> Vec<String> {
    documents.iter().map(|d| d.to_string()).collect()
}

#[test]
fn test_config_default() {
    let config = CrossEncoderConfig::default();

    assert_eq!(config.model_path, PathBuf::from("/app/model"));
    assert_eq!(config.max_seq_len, MAX_SEQ_LEN);
    assert_eq!(MAX_SEQ_LEN, 512);
}

#[test]
fn test_config_new() {
    let config = CrossEncoderConfig::new("/models/ms-marco-MiniLM");

    assert_eq!(config.model_path, PathBuf::from("/models/ms-marco-MiniLM"));
    assert_eq!(config.max_seq_len, MAX_SEQ_LEN);
}

#[test]
fn test_config_with_max_seq_len() {
    let config = CrossEncoderConfig::default().with_max_seq_len(128);

    assert_eq!(config.max_seq_len, 128);
}

#[test]
fn test_config_validate() {
    assert!(CrossEncoderConfig::default().validate().is_ok());

    let empty_path = CrossEncoderConfig::new("");
    assert!(empty_path.validate().is_err());

    let zero_len = CrossEncoderConfig::default().with_max_seq_len(0);
    assert!(zero_len.validate().is_err());
}

#[test]
fn test_load_invalid_config() {
    let result = CrossEncoder::load(CrossEncoderConfig::new(""));

    assert!(matches!(
        result.unwrap_err(),
        RerankerError::InvalidConfig { .. }
    ));
}

#[test]
fn test_load_missing_model_dir() {
    let config = CrossEncoderConfig::new("/nonexistent/path/cross-encoder");
    let err = CrossEncoder::load(config).unwrap_err();

    assert!(matches!(err, RerankerError::ModelNotFound { .. }));
    assert!(err.to_string().contains("/nonexistent/path/cross-encoder"));
}

#[test]
fn test_load_missing_weights() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(MODEL_CONFIG_FILE), "{}").unwrap();
    write_tokenizer(dir.path());

    let err = CrossEncoder::load(CrossEncoderConfig::new(dir.path())).unwrap_err();

    assert!(matches!(err, RerankerError::ModelLoadFailed { .. }));
    assert!(err.to_string().contains(MODEL_WEIGHTS_FILE));
}

#[test]
fn test_load_missing_tokenizer() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(MODEL_CONFIG_FILE), "{}").unwrap();
    std::fs::write(dir.path().join(MODEL_WEIGHTS_FILE), b"").unwrap();

    let err = CrossEncoder::load(CrossEncoderConfig::new(dir.path())).unwrap_err();

    assert!(matches!(err, RerankerError::ModelLoadFailed { .. }));
    assert!(err.to_string().contains(TOKENIZER_FILE));
}

#[test]
fn test_load_unparseable_artifacts() {
    let dir = TempDir::new().unwrap();
    write_placeholder_artifacts(dir.path());

    let err = CrossEncoder::load(CrossEncoderConfig::new(dir.path())).unwrap_err();

    assert!(matches!(err, RerankerError::ModelLoadFailed { .. }));
}

#[test]
fn test_error_messages_descriptive() {
    let err = RerankerError::ModelNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err = RerankerError::TokenizationFailed {
        reason: "bad input".to_string(),
    };
    assert!(err.to_string().contains("bad input"));
}

#[test]
fn test_candle_error_maps_to_inference_failure() {
    let err: RerankerError = candle_core::Error::Msg("shape mismatch".to_string()).into();

    assert!(matches!(err, RerankerError::InferenceFailed { .. }));
    assert!(err.to_string().contains("shape mismatch"));
}

#[test]
fn test_score_pairs_uses_pooled_cls_state() {
    let (_dir, encoder) = load_bert_encoder(Some(0.25));

    let scores = encoder
        .score_pairs("cat", &docs(&["a cat sat", "a feline animal on the mat"]))
        .unwrap();

    assert_eq!(scores.len(), 2);
    for score in scores {
        assert!((score - 0.25).abs() < 1e-6, "score = {score}");
    }
}

#[test]
fn test_score_pairs_one_logit_per_pair() {
    let (_dir, encoder) = load_bert_encoder(None);

    let scores = encoder
        .score_pairs("cat", &docs(&["a cat sat", "the mat", "a feline animal on the mat"]))
        .unwrap();

    assert_eq!(scores.len(), 3);
    assert!(scores.iter().all(|s| s.is_finite()));
}

#[test]
fn test_score_pairs_empty_documents() {
    let (_dir, encoder) = load_bert_encoder(None);

    assert!(encoder.score_pairs("cat", &[]).unwrap().is_empty());
}

#[test]
fn test_padding_does_not_change_scores() {
    let (_dir, encoder) = load_bert_encoder(None);

    let alone = encoder.score_pairs("cat", &docs(&["a cat sat"])).unwrap();
    let batched = encoder
        .score_pairs("cat", &docs(&["a cat sat", "a feline animal on the mat"]))
        .unwrap();

    assert_eq!(batched.len(), 2);
    assert!(
        (alone[0] - batched[0]).abs() < 1e-5,
        "alone = {alone:?}, batched = {batched:?}"
    );
}

#[test]
fn test_truncated_pairs_still_score() {
    let dir = TempDir::new().unwrap();
    write_bert_checkpoint(dir.path(), None);
    write_tokenizer(dir.path());
    let config = CrossEncoderConfig::new(dir.path()).with_max_seq_len(4);
    let encoder = CrossEncoder::load(config).unwrap();

    let long_document = "a cat sat on the mat ".repeat(20);
    let scores = encoder
        .score_pairs("cat", &[long_document, "mat".to_string()])
        .unwrap();

    assert_eq!(scores.len(), 2);
}

#[test]
fn test_roberta_checkpoint_scores_pairs() {
    let dir = TempDir::new().unwrap();
    write_roberta_checkpoint(dir.path(), -1.5);
    write_tokenizer(dir.path());

    let encoder = CrossEncoder::load(CrossEncoderConfig::new(dir.path())).unwrap();
    let scores = encoder
        .score_pairs("cat", &docs(&["a cat sat", "the mat"]))
        .unwrap();

    assert_eq!(scores.len(), 2);
    for score in scores {
        assert!((score + 1.5).abs() < 1e-6, "score = {score}");
    }
}

#[test]
fn test_reranker_over_loaded_model() {
    let (_dir, encoder) = load_bert_encoder(None);
    let reranker = Reranker::new(encoder);

    let response = reranker
        .rerank(RerankRequest::new("cat", ["a cat sat", "the mat", "a feline animal"]))
        .unwrap();

    assert_eq!(response.len(), 3);
    let scores: Vec<f32> = response.reranked_documents.iter().map(|d| d.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
