use super::*;

fn stub_embedder() -> SemanticEmbedder {
    SemanticEmbedder::load(EmbedderConfig::stub()).expect("stub embedder should always load")
}

#[test]
fn test_stub_embeddings_are_deterministic() {
    let embedder = stub_embedder();
    let a = embedder.embed("machine learning in healthcare").unwrap();
    let b = embedder.embed("machine learning in healthcare").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_embeddings_are_normalized() {
    let embedder = stub_embedder();
    let embedding = embedder.embed("some text to embed").unwrap();
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
}

#[test]
fn test_identical_texts_have_unit_cosine() {
    let embedder = stub_embedder();
    let a = embedder.embed("identical input").unwrap();
    let b = embedder.embed("identical input").unwrap();
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
}

#[test]
fn test_different_texts_have_low_cosine() {
    let embedder = stub_embedder();
    let a = embedder.embed("machine learning for medical diagnosis").unwrap();
    let b = embedder.embed("sustainable agriculture and irrigation").unwrap();
    // Hash-seeded vectors in 768 dimensions are close to orthogonal.
    assert!(cosine_similarity(&a, &b).abs() < 0.2);
}

#[test]
fn test_cosine_similarity_edge_cases() {
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < f32::EPSILON);
    assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < f32::EPSILON);
}

#[test]
fn test_missing_model_dir_fails_validation() {
    let err = SemanticEmbedder::load(EmbedderConfig::default());
    assert!(matches!(err, Err(EmbeddingError::InvalidConfig { .. })));

    let err = SemanticEmbedder::load(EmbedderConfig::new("/nonexistent/model/dir"));
    assert!(matches!(err, Err(EmbeddingError::ModelNotFound { .. })));
}

#[test]
fn test_capability_stub_is_available() {
    let capability = SemanticCapability::stub();
    assert!(capability.is_available());
    assert!(capability.embedder().is_some_and(|e| e.is_stub()));
}

#[test]
fn test_capability_with_bad_config_degrades() {
    let capability = SemanticCapability::new(EmbedderConfig::new("/nonexistent/model/dir"));
    assert!(!capability.is_available());
    // Probing again does not retry the load.
    assert!(!capability.is_available());
}

#[test]
fn test_capability_unavailable_constructor() {
    let capability = SemanticCapability::unavailable();
    assert!(!capability.is_available());
}

#[test]
fn test_capability_initializes_once_under_concurrency() {
    use std::sync::Arc;

    let capability = Arc::new(SemanticCapability::stub());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let capability = Arc::clone(&capability);
            std::thread::spawn(move || capability.embedder().cloned())
        })
        .collect();

    let embedders: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().expect("stub should load"))
        .collect();

    // Every thread observed the same instance.
    for embedder in &embedders[1..] {
        assert!(Arc::ptr_eq(&embedders[0], embedder));
    }
}
