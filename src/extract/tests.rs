use super::*;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_url_extension() {
    assert_eq!(url_extension("http://x.test/doc.pdf"), Some("pdf".into()));
    assert_eq!(
        url_extension("http://x.test/doc.PDF?dl=1"),
        Some("pdf".into())
    );
    assert_eq!(
        url_extension("http://x.test/a/b/notes.md#top"),
        Some("md".into())
    );
    assert_eq!(url_extension("http://x.test/no-extension"), None);
    assert_eq!(url_extension("http://x.test/trailing."), None);
}

#[test]
fn test_is_pdf_magic() {
    assert!(is_pdf(b"%PDF-1.7 rest of file"));
    assert!(!is_pdf(b"PK\x03\x04 zip archive"));
    assert!(!is_pdf(b""));
}

#[test]
fn test_pdf_text_rejects_garbage() {
    assert!(pdf_text(b"not a pdf at all").is_err());
}

#[tokio::test]
async fn test_extract_plain_text_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("plain text body")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new().unwrap();
    let text = extractor
        .extract_from_url(&format!("{}/notes.txt", server.uri()))
        .await;
    assert_eq!(text, "plain text body");
}

#[tokio::test]
async fn test_extract_by_content_type_without_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/document"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("served as text")
                .insert_header("content-type", "text/markdown; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new().unwrap();
    let text = extractor
        .extract_from_url(&format!("{}/document", server.uri()))
        .await;
    assert_eq!(text, "served as text");
}

#[tokio::test]
async fn test_unsupported_type_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"PK\x03\x04".to_vec())
                .insert_header("content-type", "application/zip"),
        )
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new().unwrap();
    let text = extractor
        .extract_from_url(&format!("{}/archive.zip", server.uri()))
        .await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_http_error_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new().unwrap();
    let text = extractor
        .extract_from_url(&format!("{}/missing.txt", server.uri()))
        .await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_unreachable_host_yields_empty() {
    let extractor = ContentExtractor::with_timeout(std::time::Duration::from_millis(200)).unwrap();
    let text = extractor
        .extract_from_url("http://127.0.0.1:1/never.txt")
        .await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_empty_url_yields_empty() {
    let extractor = ContentExtractor::new().unwrap();
    assert_eq!(extractor.extract_from_url("").await, "");
    assert_eq!(extractor.extract_from_url("   ").await, "");
}

#[tokio::test]
async fn test_corrupt_pdf_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.7 but truncated".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new().unwrap();
    let text = extractor
        .extract_from_url(&format!("{}/broken.pdf", server.uri()))
        .await;
    assert_eq!(text, "");
}
