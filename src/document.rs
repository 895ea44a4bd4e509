//! Caller-supplied reference documents.

use serde::{Deserialize, Serialize};

/// A reference document supplied with each request.
///
/// The engine treats this as immutable input: scores and signal breakdowns
/// are attached to projections, never written back here. Every field
/// defaults so partial caller JSON is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub document_url: Option<String>,
}

impl Document {
    /// Returns the document URL if it is present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.document_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}
