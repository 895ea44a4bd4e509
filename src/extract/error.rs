use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("fetch failed: {reason}")]
    Fetch { reason: String },

    #[error("unsupported content type `{content_type}`")]
    UnsupportedType { content_type: String },

    #[error("pdf parsing failed: {reason}")]
    PdfParse { reason: String },

    #[error("http client construction failed: {reason}")]
    Client { reason: String },
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        ExtractionError::Fetch {
            reason: err.to_string(),
        }
    }
}
