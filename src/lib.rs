//! Simscreen library crate (used by the server binary and integration tests).
//!
//! Flags potential overlap between a submitted text (or title+description)
//! and a corpus of reference documents supplied with each request.
//!
//! # Pipeline
//!
//! request → content extraction per candidate → normalization → per-candidate
//! signal computation → fusion → ranking → report. The metadata-only variant
//! skips extraction and semantic scoring.
//!
//! # Capability tiers
//!
//! - **semantic**: dense-embedding cosine joins the signal set
//! - **lexical-only**: the model is unavailable; TF-IDF cosine is primary
//! - **metadata-only**: title + description pairs, lexical scoring plus a
//!   near-duplicate title check
//!
//! Score semantics stay consistent and bounded to `[0, 100]` across tiers.

pub mod config;
pub mod constants;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod extract;
pub mod gateway;
pub mod keywords;
pub mod lexical;
pub mod normalize;
pub mod report;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use document::Document;
pub use embedding::{
    EmbedderConfig, EmbeddingError, SemanticCapability, SemanticEmbedder, cosine_similarity,
};
pub use engine::SimilarityEngine;
pub use extract::{ContentExtractor, ExtractionError, is_pdf, pdf_text};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use keywords::{extract_keywords, keyword_overlap};
pub use lexical::{LexicalOutcome, batch_similarities};
pub use report::{
    MatchEntry, MetadataReport, Report, METHODOLOGY_LEXICAL, METHODOLOGY_METADATA,
    METHODOLOGY_SEMANTIC,
};
pub use scoring::{
    CandidateOutcome, Methodology, ScoredCandidate, ScoringError, SignalBreakdown, SignalSet,
    apply_near_duplicate_boost, fuse, length_factor, title_token_overlap,
};
