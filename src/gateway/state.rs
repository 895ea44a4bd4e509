use std::sync::Arc;

use crate::document::Document;
use crate::engine::SimilarityEngine;

/// Shared, cloneable handler state.
#[derive(Clone)]
pub struct HandlerState {
    pub engine: Arc<SimilarityEngine>,

    /// Fallback corpus used when a request supplies no projects.
    pub sample_corpus: Arc<Vec<Document>>,
}

impl HandlerState {
    pub fn new(engine: Arc<SimilarityEngine>, sample_corpus: Vec<Document>) -> Self {
        Self {
            engine,
            sample_corpus: Arc::new(sample_corpus),
        }
    }
}
