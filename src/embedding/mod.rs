//! Semantic embedding capability.
//!
//! Texts are represented as dense vectors from a BERT-style encoder
//! (first-token pooling, l2-normalized), each text embedded independently.
//! The capability is optional: the model may be missing or fail to load, and
//! the rest of the pipeline must keep working without it. Callers go through
//! [`SemanticCapability`], a process-wide handle that initializes the model
//! at most once and exposes an explicit availability probe instead of
//! exception-driven fallback.

/// BERT encoder wrapper.
pub mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

#[cfg(test)]
mod tests;

pub use config::EmbedderConfig;
pub use error::EmbeddingError;

use std::sync::{Arc, OnceLock};

use candle_core::{Device, IndexOp, Tensor};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;

enum EmbedderBackend {
    Model {
        model: BertEncoder,
        tokenizer: Box<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Dense-vector embedder for semantic similarity (supports stub mode).
pub struct SemanticEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SemanticEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SemanticEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Semantic embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for semantic embedder");

        let tokenizer = load_tokenizer_with_truncation(&config)?;

        let model = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        info!(
            model_dir = %config.model_dir.display(),
            max_seq_len = config.max_seq_len,
            "Semantic embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer: Box::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Generates an l2-normalized embedding for a single text.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let token_ids = encoding.get_ids();
        if token_ids.is_empty() {
            return Ok(vec![0.0; self.config.stub_embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = token_ids.len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(token_ids, device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model
            .forward_pooled(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let embedding = pooled.i(0)?.to_vec1::<f32>()?;

        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.stub_embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.stub_embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}

fn load_tokenizer_with_truncation(config: &EmbedderConfig) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer = Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
        EmbeddingError::TokenizationFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        }
    })?;

    let truncation = TruncationParams {
        max_length: config.max_seq_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}

/// Cosine similarity between two dense vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (av, bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Process-wide handle to the semantic embedding capability.
///
/// The model is expensive to load and is shared across all requests, so
/// initialization happens at most once per process lifetime; `OnceLock`
/// guards concurrent first use. A failed load leaves the capability
/// unavailable for the rest of the process and the pipeline runs in
/// lexical-only mode.
pub struct SemanticCapability {
    config: EmbedderConfig,
    slot: OnceLock<Option<Arc<SemanticEmbedder>>>,
}

impl std::fmt::Debug for SemanticCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticCapability")
            .field("initialized", &self.slot.get().is_some())
            .field("available", &self.slot.get().map(Option::is_some))
            .finish()
    }
}

impl SemanticCapability {
    /// Creates the handle without loading anything yet.
    pub fn new(config: EmbedderConfig) -> Self {
        Self {
            config,
            slot: OnceLock::new(),
        }
    }

    /// A handle whose embedder is the deterministic stub.
    pub fn stub() -> Self {
        Self::new(EmbedderConfig::stub())
    }

    /// A handle that is permanently unavailable (lexical-only mode).
    pub fn unavailable() -> Self {
        let capability = Self::new(EmbedderConfig::default());
        let _ = capability.slot.set(None);
        capability
    }

    /// Returns the embedder, initializing it on first use.
    pub fn embedder(&self) -> Option<&Arc<SemanticEmbedder>> {
        self.slot
            .get_or_init(|| match SemanticEmbedder::load(self.config.clone()) {
                Ok(embedder) => Some(Arc::new(embedder)),
                Err(e) => {
                    warn!(error = %e, "Semantic model unavailable, degrading to lexical-only mode");
                    None
                }
            })
            .as_ref()
    }

    /// Capability probe: `true` when the semantic signal can be produced.
    pub fn is_available(&self) -> bool {
        self.embedder().is_some()
    }
}
