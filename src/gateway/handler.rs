use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::{debug, info, instrument};

use crate::constants::MIN_QUERY_CHARS;
use crate::document::Document;
use crate::extract;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    CheckMetadataRequest, CheckSimilarityRequest, HealthResponse, PdfExtractResponse,
};
use crate::gateway::state::HandlerState;
use crate::report::{MetadataReport, Report};

#[instrument(skip(state, request), fields(corpus_size = tracing::field::Empty))]
pub async fn check_similarity_handler(
    State(state): State<HandlerState>,
    Json(request): Json<CheckSimilarityRequest>,
) -> Result<Json<Report>, GatewayError> {
    if request.text.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(GatewayError::InvalidRequest(
            "text content too short for meaningful comparison".to_string(),
        ));
    }

    let supplied = request.projects.filter(|p| !p.is_empty());
    let corpus: &[Document] = match &supplied {
        Some(projects) => projects,
        None => {
            if state.sample_corpus.is_empty() {
                return Err(GatewayError::InvalidRequest(
                    "no projects provided and no fallback corpus available".to_string(),
                ));
            }
            debug!("No projects provided, using fallback corpus");
            &state.sample_corpus
        }
    };
    tracing::Span::current().record("corpus_size", corpus.len());

    let report = state.engine.check_similarity(&request.text, corpus).await;

    Ok(Json(report))
}

#[instrument(skip(state, request))]
pub async fn check_metadata_similarity_handler(
    State(state): State<HandlerState>,
    Json(request): Json<CheckMetadataRequest>,
) -> Result<Json<MetadataReport>, GatewayError> {
    if request.title.trim().is_empty() && request.description.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "title or description required".to_string(),
        ));
    }

    if request.projects.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "no projects provided for comparison".to_string(),
        ));
    }

    let report =
        state
            .engine
            .check_metadata(&request.title, &request.description, &request.projects);

    Ok(Json(report))
}

#[instrument(skip(multipart))]
pub async fn extract_pdf_text_handler(
    mut multipart: Multipart,
) -> Result<Json<PdfExtractResponse>, GatewayError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid multipart payload: {e}")))?
        .ok_or_else(|| GatewayError::InvalidRequest("missing file field".to_string()))?;

    let filename = field.file_name().unwrap_or("upload.pdf").to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();

    if content_type != "application/pdf" && !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(GatewayError::InvalidRequest(
            "file must be a PDF".to_string(),
        ));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("failed to read uploaded file: {e}")))?;

    if bytes.is_empty() {
        return Err(GatewayError::InvalidRequest("empty file received".to_string()));
    }

    if !extract::is_pdf(&bytes) {
        return Err(GatewayError::InvalidRequest(
            "file does not appear to be a valid PDF".to_string(),
        ));
    }

    debug!(filename = %filename, size = bytes.len(), "Extracting uploaded PDF");

    let text = tokio::task::spawn_blocking(move || extract::pdf_text(&bytes))
        .await
        .map_err(|e| GatewayError::Internal(format!("extraction task failed: {e}")))?
        .map_err(|e| GatewayError::ExtractionFailed(e.to_string()))?;

    if text.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(GatewayError::InvalidRequest(
            "could not extract meaningful text from PDF".to_string(),
        ));
    }

    info!(filename = %filename, chars = text.len(), "PDF text extracted");

    Ok(Json(PdfExtractResponse {
        length: text.len(),
        text,
        filename,
    }))
}

#[instrument(skip(state))]
pub async fn health_handler(State(state): State<HandlerState>) -> Json<HealthResponse> {
    let model = if state.engine.semantic_available() {
        "semantic"
    } else {
        "lexical"
    };

    Json(HealthResponse {
        status: "healthy",
        model,
    })
}
