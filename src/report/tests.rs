use super::*;
use crate::scoring::{Methodology, SignalBreakdown};

fn candidate(id: &str, score: f32) -> ScoredCandidate {
    ScoredCandidate {
        document: Document {
            id: id.to_string(),
            title: format!("title {id}"),
            author: "author".to_string(),
            year: Some(2024),
            description: String::new(),
            tags: Vec::new(),
            document_url: None,
        },
        similarity_score: score,
        breakdown: SignalBreakdown::unscored(Methodology::MetadataFallback, "test"),
    }
}

#[test]
fn test_rank_is_descending() {
    let ranked = rank(vec![
        candidate("a", 10.0),
        candidate("b", 90.0),
        candidate("c", 50.0),
    ]);
    let ids: Vec<&str> = ranked.iter().map(|c| c.document.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn test_rank_is_stable_on_ties() {
    let ranked = rank(vec![
        candidate("first", 40.0),
        candidate("second", 40.0),
        candidate("third", 40.0),
    ]);
    let ids: Vec<&str> = ranked.iter().map(|c| c.document.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_overall_max() {
    let top = vec![candidate("a", 80.0), candidate("b", 30.0)];
    assert_eq!(overall_max(&top), 80.0);
    assert_eq!(overall_max(&[]), 0.0);
}

#[test]
fn test_self_weighted_equals_max_when_one_dominates() {
    let top = vec![candidate("a", 90.0), candidate("b", 0.0)];
    assert!((overall_self_weighted(&top) - 90.0).abs() < 0.01);
}

#[test]
fn test_self_weighted_even_split() {
    let top = vec![candidate("a", 40.0), candidate("b", 40.0)];
    // Each weight is 0.5, so the average stays at 40.
    assert!((overall_self_weighted(&top) - 40.0).abs() < 0.01);
}

#[test]
fn test_self_weighted_zero_scores() {
    let top = vec![candidate("a", 0.0), candidate("b", 0.0)];
    assert_eq!(overall_self_weighted(&top), 0.0);
}

#[test]
fn test_report_caps_matches_at_five() {
    let ranked = rank((0..8).map(|i| candidate(&i.to_string(), i as f32)).collect());
    let report = build_report(&ranked, 8, 12, true);
    assert_eq!(report.matches.len(), 5);
    assert_eq!(report.corpus_size, 8);
    assert_eq!(report.query_word_count, 12);
    assert_eq!(report.methodology, METHODOLOGY_SEMANTIC);
}

#[test]
fn test_report_empty_corpus() {
    let report = build_report(&[], 0, 3, false);
    assert_eq!(report.overall_similarity, 0.0);
    assert!(report.matches.is_empty());
    assert_eq!(report.corpus_size, 0);
    assert_eq!(report.methodology, METHODOLOGY_LEXICAL);
}

#[test]
fn test_match_projection_excludes_breakdown() {
    let report = build_report(&[candidate("a", 50.0)], 1, 1, true);
    let json = serde_json::to_value(&report).unwrap();
    let entry = &json["matches"][0];
    assert!(entry.get("breakdown").is_none());
    assert_eq!(entry["id"], "a");
    assert_eq!(entry["similarity_score"], 50.0);
}

#[test]
fn test_metadata_report_counts() {
    let filtered = rank(vec![
        candidate("a", 80.0),
        candidate("b", 25.0),
        candidate("c", 10.0),
        candidate("d", 9.0),
        candidate("e", 8.0),
        candidate("f", 7.0),
    ]);
    let report = build_metadata_report(&filtered, 10, 6);
    assert_eq!(report.total_matches, 6);
    assert_eq!(report.significant_matches, 2);
    assert_eq!(report.matches.len(), 5);
    assert_eq!(report.overall_similarity, 80.0);
    assert_eq!(report.comparison_type, COMPARISON_TYPE_METADATA);
    assert_eq!(report.methodology, METHODOLOGY_METADATA);
}
