use serde::Serialize;

use crate::document::Document;

use super::error::ScoringError;

/// How a candidate's comparison text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    /// Full document content fetched from its URL.
    FullContent,
    /// Full content unavailable; weighted metadata representation used.
    MetadataFallback,
    /// Metadata-only endpoint: title + description pairs.
    MetadataOnly,
}

/// The independent similarity signals for one query/candidate pair.
///
/// `semantic` is absent in degraded-capability mode. `length_factor` is
/// `0.0` (signal absent) only when either text has zero words, which makes
/// the pair non-comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSet {
    pub semantic: Option<f32>,
    pub lexical: f32,
    pub keyword_overlap: f32,
    pub length_factor: f32,
}

impl SignalSet {
    /// Rejects non-finite or out-of-range signals before fusion, so a broken
    /// upstream signal fails one candidate instead of poisoning the batch.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let checks = [
            ("semantic", self.semantic.unwrap_or(0.0), 1.0),
            ("lexical", self.lexical, 1.0),
            ("keyword_overlap", self.keyword_overlap, 1.0),
            ("length_factor", self.length_factor, 1.0),
        ];

        for (signal, value, max) in checks {
            if !value.is_finite() || value < 0.0 || value > max {
                return Err(ScoringError::InvalidSignal { signal, value });
            }
        }

        Ok(())
    }
}

/// Per-signal breakdown attached to a scored candidate for explainability.
/// Signal values are percentages except `length_factor`.
#[derive(Debug, Clone, Serialize)]
pub struct SignalBreakdown {
    pub methodology: Methodology,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<f32>,
    pub lexical: f32,
    pub keyword_overlap: f32,
    pub length_factor: f32,
    pub query_keywords: Vec<String>,
    pub candidate_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SignalBreakdown {
    /// Breakdown for a candidate that could not be scored.
    pub fn unscored(methodology: Methodology, reason: impl Into<String>) -> Self {
        Self {
            methodology,
            semantic: None,
            lexical: 0.0,
            keyword_overlap: 0.0,
            length_factor: 0.0,
            query_keywords: Vec::new(),
            candidate_keywords: Vec::new(),
            reason: Some(reason.into()),
        }
    }
}

/// Explicit per-candidate result: scoring one candidate either succeeds or
/// fails in one of the enumerated ways, and a failure never aborts the batch.
#[derive(Debug, Clone)]
pub enum CandidateOutcome {
    Scored { score: f32 },
    TooShort,
    InsufficientData,
    Failed { reason: String },
}

impl CandidateOutcome {
    /// Final score; the non-scored shapes all score zero.
    pub fn score(&self) -> f32 {
        match self {
            CandidateOutcome::Scored { score } => *score,
            _ => 0.0,
        }
    }

    /// Human-readable reason recorded for the non-scored shapes.
    pub fn reason(&self) -> Option<String> {
        match self {
            CandidateOutcome::Scored { .. } => None,
            CandidateOutcome::TooShort => {
                Some("document too short for meaningful comparison".to_string())
            }
            CandidateOutcome::InsufficientData => {
                Some("insufficient text for vector comparison".to_string())
            }
            CandidateOutcome::Failed { reason } => Some(reason.clone()),
        }
    }
}

/// A candidate document with its final score and signal breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub document: Document,
    pub similarity_score: f32,
    pub breakdown: SignalBreakdown,
}
