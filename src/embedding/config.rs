use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// Configuration for [`SemanticEmbedder`](super::SemanticEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`.
    pub model_dir: PathBuf,
    /// Max tokens to consider per text.
    pub max_seq_len: usize,
    /// Output dimension of the deterministic stub backend. The real model's
    /// dimension comes from its own config.
    pub stub_embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            stub_embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Path to the tokenizer file inside the model directory.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }
}
