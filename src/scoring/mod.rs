//! Signal fusion and tiered gating.
//!
//! Combines the available signals for one query/candidate pair into a single
//! bounded score. Keyword overlap gates the combination: without shared
//! vocabulary even high semantic similarity is heavily penalized. All
//! thresholds and weights are named constants in [`crate::constants`].

pub mod error;
pub mod types;


pub use error::ScoringError;
pub use types::{CandidateOutcome, Methodology, ScoredCandidate, SignalBreakdown, SignalSet};

use std::collections::HashSet;

use crate::constants::{
    DISJOINT_VOCAB_PENALTY, GATED_OVERLAP_WEIGHT, GATED_PRIMARY_WEIGHT, KEYWORD_WEIGHT,
    LENGTH_FACTOR_FLOOR, LENGTH_FACTOR_RANGE, LENGTH_WEIGHT, LEXICAL_OVERLAP_WEIGHT,
    LEXICAL_PRIMARY_WEIGHT, LEXICAL_WEIGHT, LOW_OVERLAP_THRESHOLD, MODERATE_OVERLAP_PENALTY,
    MODERATE_OVERLAP_THRESHOLD, NEAR_DUPLICATE_BOOST, NEAR_DUPLICATE_CAP,
    NEAR_DUPLICATE_MIN_SCORE, NEAR_DUPLICATE_TITLE_OVERLAP, SCORE_MAX, SEMANTIC_WEIGHT,
};

/// Fuses a validated signal set into a final score in `[0, 100]`.
///
/// The primary signal is the semantic one when present, the lexical one
/// otherwise; fusion never depends on catching a missing-capability failure
/// at this depth. A zero length factor marks the pair non-comparable and
/// always yields zero.
pub fn fuse(signals: &SignalSet) -> f32 {
    if signals.length_factor == 0.0 {
        return 0.0;
    }

    let primary = signals.semantic.unwrap_or(signals.lexical);

    let combined = if signals.keyword_overlap < LOW_OVERLAP_THRESHOLD {
        primary * DISJOINT_VOCAB_PENALTY
    } else if signals.keyword_overlap < MODERATE_OVERLAP_THRESHOLD {
        (primary * GATED_PRIMARY_WEIGHT + signals.keyword_overlap * GATED_OVERLAP_WEIGHT)
            * MODERATE_OVERLAP_PENALTY
    } else if let Some(semantic) = signals.semantic {
        semantic * SEMANTIC_WEIGHT
            + signals.keyword_overlap * KEYWORD_WEIGHT
            + signals.lexical * LEXICAL_WEIGHT
            + signals.length_factor * LENGTH_WEIGHT
    } else {
        signals.lexical * LEXICAL_PRIMARY_WEIGHT
            + signals.keyword_overlap * LEXICAL_OVERLAP_WEIGHT
    };

    (combined * signals.length_factor * 100.0).clamp(0.0, SCORE_MAX)
}

/// Word-count ratio scaled into `[0.7, 1.0]`, or `0.0` (signal absent) when
/// either text has no words.
pub fn length_factor(query_words: usize, candidate_words: usize) -> f32 {
    if query_words == 0 || candidate_words == 0 {
        return 0.0;
    }

    let ratio = query_words.min(candidate_words) as f32 / query_words.max(candidate_words) as f32;
    LENGTH_FACTOR_FLOOR + LENGTH_FACTOR_RANGE * ratio
}

/// Jaccard overlap of whitespace-tokenized, lower-cased title words.
pub fn title_token_overlap(a: &str, b: &str) -> f32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f32 / union as f32
}

/// Amplifies a metadata-mode score when title overlap marks the pair as a
/// potential near-duplicate. Metadata comparison under-weights
/// obviously-identical titles; the cap keeps the boost from ever reporting
/// a false 100% match.
pub fn apply_near_duplicate_boost(score: f32, title_overlap: f32) -> f32 {
    if title_overlap >= NEAR_DUPLICATE_TITLE_OVERLAP && score > NEAR_DUPLICATE_MIN_SCORE {
        (score * NEAR_DUPLICATE_BOOST).min(NEAR_DUPLICATE_CAP)
    } else {
        score
    }
}
