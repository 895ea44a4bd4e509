//! Ranking and report building.
//!
//! Scored candidates are sorted descending (stable, so ties keep their
//! original candidate order), the top matches selected, and an aggregate
//! score computed. The aggregation differs by pipeline: the semantic path
//! asks "is there any one strong match" (max), the lexical-only path uses a
//! self-weighted average. That asymmetry is inherited behavior, kept as-is.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use serde::Serialize;

use crate::constants::{SCORE_MAX, SIGNIFICANT_MATCH_THRESHOLD, TOP_MATCH_LIMIT};
use crate::document::Document;
use crate::scoring::ScoredCandidate;

/// Methodology tag for the full pipeline with the semantic signal.
pub const METHODOLOGY_SEMANTIC: &str = "multi_signal_semantic";
/// Methodology tag for the full pipeline in lexical-only mode.
pub const METHODOLOGY_LEXICAL: &str = "multi_signal_lexical";
/// Methodology tag for the metadata-only comparison.
pub const METHODOLOGY_METADATA: &str = "tfidf_metadata";

/// Comparison-type marker on metadata-only reports.
pub const COMPARISON_TYPE_METADATA: &str = "title_and_description_only";

/// Report projection of one matched candidate. Deliberately excludes the
/// signal breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub similarity_score: f32,
    pub document_url: Option<String>,
}

impl MatchEntry {
    fn project(candidate: &ScoredCandidate) -> Self {
        let Document {
            id,
            title,
            author,
            year,
            document_url,
            ..
        } = candidate.document.clone();

        Self {
            id,
            title,
            author,
            year,
            similarity_score: candidate.similarity_score,
            document_url,
        }
    }
}

/// Similarity report for the full pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub overall_similarity: f32,
    pub matches: Vec<MatchEntry>,
    pub corpus_size: usize,
    pub query_word_count: usize,
    pub methodology: &'static str,
}

/// Extended report for the metadata-only endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataReport {
    pub overall_similarity: f32,
    pub matches: Vec<MatchEntry>,
    pub corpus_size: usize,
    pub query_word_count: usize,
    pub methodology: &'static str,
    pub total_matches: usize,
    pub significant_matches: usize,
    pub comparison_type: &'static str,
}

/// Sorts candidates descending by score. `sort_by` is stable, which keeps
/// the original candidate order for equal scores.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(Ordering::Equal)
    });
    scored
}

/// Maximum score among the top candidates.
pub fn overall_max(top: &[ScoredCandidate]) -> f32 {
    top.iter()
        .map(|c| c.similarity_score)
        .fold(0.0, f32::max)
        .clamp(0.0, SCORE_MAX)
}

/// Self-weighted average: each candidate weighted by its own share of the
/// top-candidate score mass. Degenerates to the max when one score dominates
/// and to an even split only when scores are equal.
pub fn overall_self_weighted(top: &[ScoredCandidate]) -> f32 {
    let total: f32 = top.iter().map(|c| c.similarity_score).sum();
    if total <= 0.0 {
        return 0.0;
    }

    let weighted: f32 = top
        .iter()
        .map(|c| c.similarity_score * (c.similarity_score / total))
        .sum();

    weighted.clamp(0.0, SCORE_MAX)
}

/// Builds the full-pipeline report from ranked candidates.
pub fn build_report(
    ranked: &[ScoredCandidate],
    corpus_size: usize,
    query_word_count: usize,
    semantic_mode: bool,
) -> Report {
    let top = &ranked[..ranked.len().min(TOP_MATCH_LIMIT)];

    let overall_similarity = if semantic_mode {
        overall_max(top)
    } else {
        overall_self_weighted(top)
    };

    Report {
        overall_similarity,
        matches: top.iter().map(MatchEntry::project).collect(),
        corpus_size,
        query_word_count,
        methodology: if semantic_mode {
            METHODOLOGY_SEMANTIC
        } else {
            METHODOLOGY_LEXICAL
        },
    }
}

/// Builds the metadata-only report. `filtered` holds every candidate above
/// the inclusion floor, already ranked; `matches` is capped while the totals
/// reflect the whole filtered set.
pub fn build_metadata_report(
    filtered: &[ScoredCandidate],
    corpus_size: usize,
    query_word_count: usize,
) -> MetadataReport {
    let top = &filtered[..filtered.len().min(TOP_MATCH_LIMIT)];

    let significant_matches = filtered
        .iter()
        .filter(|c| c.similarity_score > SIGNIFICANT_MATCH_THRESHOLD)
        .count();

    MetadataReport {
        overall_similarity: overall_max(top),
        matches: top.iter().map(MatchEntry::project).collect(),
        corpus_size,
        query_word_count,
        methodology: METHODOLOGY_METADATA,
        total_matches: filtered.len(),
        significant_matches,
        comparison_type: COMPARISON_TYPE_METADATA,
    }
}
