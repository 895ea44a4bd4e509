//! Cross-cutting, shared constants.
//!
//! The fusion thresholds and weights live here rather than next to the fusion
//! algorithm so they can be tuned and tested independently of its structure.

/// Upper bound for every similarity score and for `overall_similarity`.
pub const SCORE_MAX: f32 = 100.0;

/// A match is "significant" above this score. Fixed, not per-request.
pub const SIGNIFICANT_MATCH_THRESHOLD: f32 = 20.0;

/// Maximum number of matches included in a report.
pub const TOP_MATCH_LIMIT: usize = 5;

/// Maximum number of extracted keywords per text.
pub const KEYWORD_LIMIT: usize = 10;

/// Keywords echoed in a signal breakdown (explainability only).
pub const BREAKDOWN_KEYWORD_LIMIT: usize = 5;

/// Minimum normalized text length for a candidate to be comparable.
pub const MIN_COMPARABLE_CHARS: usize = 20;

/// Minimum trimmed query length accepted by the similarity endpoints.
pub const MIN_QUERY_CHARS: usize = 10;

/// Minimum trimmed length for a URL extract to count as full content.
/// Shorter extracts fall back to the metadata representation.
pub const MIN_FULL_CONTENT_CHARS: usize = 100;

/// Keyword overlap below this gets the disjoint-vocabulary penalty.
pub const LOW_OVERLAP_THRESHOLD: f32 = 0.1;

/// Keyword overlap below this (but at least [`LOW_OVERLAP_THRESHOLD`]) gets
/// the moderate penalty tier.
pub const MODERATE_OVERLAP_THRESHOLD: f32 = 0.2;

/// Multiplier applied to the primary signal when vocabularies are disjoint.
pub const DISJOINT_VOCAB_PENALTY: f32 = 0.3;

/// Dampening multiplier for the moderate-overlap tier.
pub const MODERATE_OVERLAP_PENALTY: f32 = 0.7;

/// Primary-signal weight inside the moderate-overlap tier.
pub const GATED_PRIMARY_WEIGHT: f32 = 0.6;

/// Overlap weight inside the moderate-overlap tier.
pub const GATED_OVERLAP_WEIGHT: f32 = 0.4;

/// Full fusion weight: semantic signal.
pub const SEMANTIC_WEIGHT: f32 = 0.4;
/// Full fusion weight: keyword overlap.
pub const KEYWORD_WEIGHT: f32 = 0.3;
/// Full fusion weight: lexical signal.
pub const LEXICAL_WEIGHT: f32 = 0.2;
/// Full fusion weight: length factor.
pub const LENGTH_WEIGHT: f32 = 0.1;

/// Lexical-only fusion weight: lexical signal.
pub const LEXICAL_PRIMARY_WEIGHT: f32 = 0.7;
/// Lexical-only fusion weight: keyword overlap.
pub const LEXICAL_OVERLAP_WEIGHT: f32 = 0.3;

/// Length factor is `FLOOR + RANGE * word_count_ratio`, so it stays in
/// `[0.7, 1.0]` whenever both texts have at least one word.
pub const LENGTH_FACTOR_FLOOR: f32 = 0.7;
/// See [`LENGTH_FACTOR_FLOOR`].
pub const LENGTH_FACTOR_RANGE: f32 = 0.3;

/// Title token Jaccard at or above this marks a potential near-duplicate.
pub const NEAR_DUPLICATE_TITLE_OVERLAP: f32 = 0.7;

/// Score multiplier for near-duplicate metadata comparisons.
pub const NEAR_DUPLICATE_BOOST: f32 = 2.5;

/// Boosted scores never exceed this, so a metadata-only comparison cannot
/// report a false "identical" signal.
pub const NEAR_DUPLICATE_CAP: f32 = 95.0;

/// The boost only applies when the unboosted score already exceeds this.
pub const NEAR_DUPLICATE_MIN_SCORE: f32 = 30.0;

/// Candidates at or below this score are dropped from metadata-only reports.
pub const MIN_METADATA_SCORE: f32 = 5.0;

/// Per-fetch network timeout for candidate content extraction, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Embedding dimension used by the deterministic stub backend.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Token truncation limit for the semantic encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;
