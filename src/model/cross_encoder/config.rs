use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, default_model_path};

pub const MAX_SEQ_LEN: usize = DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
pub struct CrossEncoderConfig {
    pub model_path: PathBuf,

    pub max_seq_len: usize,
}

impl Default for CrossEncoderConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path().to_path_buf(),
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl CrossEncoderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            max_seq_len: MAX_SEQ_LEN,
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model_path.as_os_str().is_empty() {
            return Err("model_path cannot be empty".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be at least 1".to_string());
        }

        Ok(())
    }
}
