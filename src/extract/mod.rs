//! Content extraction.
//!
//! Resolves a document reference (URL or raw bytes) to plain text,
//! dispatching on the detected format. Extraction never raises to the
//! scoring pipeline: any failure (network, unsupported type, parse error)
//! becomes empty text, which downstream logic reads as "fall back to
//! metadata". The typed error path is kept for callers that need the
//! distinction, like the PDF upload endpoint.

mod error;

#[cfg(test)]
mod tests;

pub use error::ExtractionError;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::constants::DEFAULT_FETCH_TIMEOUT_SECS;

/// Magic-byte prefix a buffer must carry to be treated as PDF.
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// Fetches remote documents and extracts their text layer.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: reqwest::Client,
}

impl ContentExtractor {
    /// Builds an extractor with the default per-fetch timeout.
    pub fn new() -> Result<Self, ExtractionError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Builds an extractor with an explicit per-fetch timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractionError::Client {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Resolves a document URL to plain text. Never fails: all errors are
    /// recovered to an empty string, which callers treat as "no content".
    pub async fn extract_from_url(&self, url: &str) -> String {
        if url.trim().is_empty() {
            return String::new();
        }

        match self.try_extract(url).await {
            Ok(text) => {
                debug!(url, chars = text.len(), "Extracted document content");
                text
            }
            Err(e) => {
                warn!(url, error = %e, "Content extraction failed, falling back to metadata");
                String::new()
            }
        }
    }

    async fn try_extract(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let extension = url_extension(url);

        if extension.as_deref() == Some("pdf") || content_type.contains("pdf") {
            let bytes = response.bytes().await?;
            pdf_text(&bytes)
        } else if matches!(extension.as_deref(), Some("txt") | Some("md"))
            || content_type.contains("text")
        {
            Ok(response.text().await?)
        } else {
            Err(ExtractionError::UnsupportedType { content_type })
        }
    }
}

/// Extracts the text layer of each PDF page, concatenated with newlines
/// and trimmed. No OCR; scanned pages yield nothing.
pub fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        ExtractionError::PdfParse {
            reason: e.to_string(),
        }
    })?;

    Ok(pages.join("\n").trim().to_string())
}

/// Returns `true` when the buffer starts with the `%PDF` magic bytes.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Lower-cased file extension of a URL's path, ignoring query and fragment.
fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;

    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
