use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Body of `POST /check-similarity`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSimilarityRequest {
    pub text: String,
    #[serde(default)]
    pub projects: Option<Vec<Document>>,
}

/// Body of `POST /check-metadata-similarity`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckMetadataRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub projects: Vec<Document>,
}

/// Response of `POST /extract-pdf-text`.
#[derive(Debug, Clone, Serialize)]
pub struct PdfExtractResponse {
    pub text: String,
    pub length: usize,
    pub filename: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: &'static str,
}
