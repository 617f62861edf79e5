use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::constants::TOKENIZER_FILE;

/// Loads a tokenizer from a model directory or explicit tokenizer.json path.
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new(TOKENIZER_FILE))
    {
        model_path.to_path_buf()
    } else {
        model_path.join(TOKENIZER_FILE)
    };

    if !tokenizer_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Missing {} in {}", TOKENIZER_FILE, model_path.display()),
        ));
    }

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer configured for batched (query, document) pairs.
///
/// Pairs are truncated longest-first to `max_len` tokens and each batch is padded to its
/// longest member. Pad token and id come from the tokenizer's own padding config when it
/// has one.
pub fn load_pair_tokenizer(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..tokenizer.get_truncation().cloned().unwrap_or_default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    let padding = PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        ..tokenizer.get_padding().cloned().unwrap_or_default()
    };
    tokenizer.with_padding(Some(padding));

    Ok(tokenizer)
}
