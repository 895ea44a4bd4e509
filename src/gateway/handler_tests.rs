use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::document::Document;
use crate::embedding::SemanticCapability;
use crate::engine::SimilarityEngine;
use crate::extract::ContentExtractor;
use crate::gateway::{HandlerState, create_router_with_state};

const QUERY: &str = "Machine learning models for healthcare diagnosis from clinical records \
and medical imaging data.";

fn sample_doc(id: &str) -> Document {
    Document {
        id: id.to_string(),
        title: "Machine Learning in Healthcare".to_string(),
        author: "A. Researcher".to_string(),
        year: Some(2023),
        description: "Machine learning models for healthcare diagnosis from clinical \
records and medical imaging data."
            .to_string(),
        tags: vec!["ml".to_string(), "healthcare".to_string()],
        document_url: None,
    }
}

fn router_with(capability: SemanticCapability, sample_corpus: Vec<Document>) -> Router {
    let engine = Arc::new(SimilarityEngine::new(
        Arc::new(capability),
        ContentExtractor::new().unwrap(),
    ));
    create_router_with_state(HandlerState::new(engine, sample_corpus))
}

fn lexical_router() -> Router {
    router_with(SemanticCapability::unavailable(), Vec::new())
}

async fn post_json(
    router: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn multipart_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "simscreen-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/extract-pdf-text")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_lexical_mode() {
    let (status, json) = get_json(lexical_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"], "lexical");
}

#[tokio::test]
async fn test_health_reports_semantic_mode() {
    let router = router_with(SemanticCapability::stub(), Vec::new());
    let (status, json) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model"], "semantic");
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_check_similarity_rejects_short_text() {
    let (status, json) = post_json(
        lexical_router(),
        "/check-similarity",
        serde_json::json!({ "text": "short", "projects": [sample_doc("1")] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("too short"));
}

#[tokio::test]
async fn test_check_similarity_rejects_missing_corpus() {
    let (status, _) = post_json(
        lexical_router(),
        "/check-similarity",
        serde_json::json!({ "text": QUERY }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        lexical_router(),
        "/check-similarity",
        serde_json::json!({ "text": QUERY, "projects": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_similarity_uses_fallback_corpus() {
    let router = router_with(SemanticCapability::unavailable(), vec![sample_doc("fallback")]);
    let (status, json) = post_json(
        router,
        "/check-similarity",
        serde_json::json!({ "text": QUERY }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["corpus_size"], 1);
}

#[tokio::test]
async fn test_check_similarity_returns_report_shape() {
    let (status, json) = post_json(
        lexical_router(),
        "/check-similarity",
        serde_json::json!({ "text": QUERY, "projects": [sample_doc("1"), sample_doc("2")] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["overall_similarity"].as_f64().is_some());
    assert!(json["matches"].is_array());
    assert_eq!(json["corpus_size"], 2);
    assert!(json["query_word_count"].as_u64().unwrap() > 0);
    assert_eq!(json["methodology"], "multi_signal_lexical");
}

#[tokio::test]
async fn test_check_similarity_caps_matches_at_five() {
    let projects: Vec<_> = (0..7).map(|i| sample_doc(&i.to_string())).collect();
    let (status, json) = post_json(
        lexical_router(),
        "/check-similarity",
        serde_json::json!({ "text": QUERY, "projects": projects }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["matches"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_metadata_rejects_empty_title_and_description() {
    let (status, json) = post_json(
        lexical_router(),
        "/check-metadata-similarity",
        serde_json::json!({ "title": " ", "description": "", "projects": [sample_doc("1")] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("title or description"));
}

#[tokio::test]
async fn test_metadata_rejects_empty_projects() {
    let (status, _) = post_json(
        lexical_router(),
        "/check-metadata-similarity",
        serde_json::json!({ "title": "A Title", "description": "A description", "projects": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata_similarity_returns_extended_report() {
    let doc = sample_doc("1");
    let (status, json) = post_json(
        lexical_router(),
        "/check-metadata-similarity",
        serde_json::json!({
            "title": doc.title.clone(),
            "description": doc.description.clone(),
            "projects": [doc],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["comparison_type"], "title_and_description_only");
    assert_eq!(json["methodology"], "tfidf_metadata");
    assert!(json["total_matches"].as_u64().is_some());
    assert!(json["significant_matches"].as_u64().is_some());
    let overall = json["overall_similarity"].as_f64().unwrap();
    assert!(overall > 70.0 && overall <= 95.0, "overall was {overall}");
}

#[tokio::test]
async fn test_extract_pdf_rejects_wrong_type() {
    let request = multipart_request("notes.txt", "text/plain", b"hello");
    let response = lexical_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_pdf_rejects_empty_body() {
    let request = multipart_request("doc.pdf", "application/pdf", b"");
    let response = lexical_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_pdf_rejects_missing_magic_bytes() {
    let request = multipart_request("doc.pdf", "application/pdf", b"PK\x03\x04 zip bytes here");
    let response = lexical_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("valid PDF"));
}

#[tokio::test]
async fn test_extract_pdf_corrupt_file_is_server_error() {
    let request = multipart_request("doc.pdf", "application/pdf", b"%PDF-1.7 truncated garbage");
    let response = lexical_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
