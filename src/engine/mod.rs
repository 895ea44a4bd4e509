//! Request orchestration.
//!
//! One engine instance serves every request: it resolves candidate texts
//! (full content where a URL yields enough, weighted metadata otherwise),
//! computes the per-candidate signals, fuses them, and hands the ranked
//! result to the report builder. Candidates are processed sequentially and
//! failures are isolated per candidate; a request always runs to completion
//! over the whole corpus.


use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::{MIN_FULL_CONTENT_CHARS, MIN_METADATA_SCORE, MIN_QUERY_CHARS, SCORE_MAX};
use crate::document::Document;
use crate::embedding::{SemanticCapability, cosine_similarity};
use crate::extract::ContentExtractor;
use crate::keywords::{extract_keywords, keyword_overlap};
use crate::lexical::{LexicalOutcome, batch_similarities};
use crate::normalize;
use crate::report::{self, MetadataReport, Report};
use crate::scoring::{
    self, CandidateOutcome, Methodology, ScoredCandidate, SignalBreakdown, SignalSet,
};

/// Title repetitions in the weighted metadata representation.
const TITLE_WEIGHT_REPEATS: usize = 3;
/// Tag-list repetitions in the weighted metadata representation.
const TAG_WEIGHT_REPEATS: usize = 2;
/// Descriptions longer than this are included twice.
const LONG_DESCRIPTION_CHARS: usize = 100;

/// Stateless similarity pipeline over a per-request corpus.
pub struct SimilarityEngine {
    semantic: Arc<SemanticCapability>,
    extractor: ContentExtractor,
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("semantic", &self.semantic)
            .finish()
    }
}

impl SimilarityEngine {
    pub fn new(semantic: Arc<SemanticCapability>, extractor: ContentExtractor) -> Self {
        Self {
            semantic,
            extractor,
        }
    }

    /// Capability probe, used by the health endpoint.
    pub fn semantic_available(&self) -> bool {
        self.semantic.is_available()
    }

    /// Runs the full pipeline and builds the report.
    pub async fn check_similarity(&self, query_text: &str, corpus: &[Document]) -> Report {
        let (scored, semantic_mode) = self.score_corpus(query_text, corpus).await;
        let ranked = report::rank(scored);

        let report = report::build_report(
            &ranked,
            corpus.len(),
            query_text.split_whitespace().count(),
            semantic_mode,
        );

        info!(
            corpus_size = report.corpus_size,
            overall = report.overall_similarity,
            methodology = report.methodology,
            "Similarity check complete"
        );

        report
    }

    /// Scores every candidate in the corpus against the query.
    ///
    /// Returns the scored candidates (with signal breakdowns, unranked) and
    /// whether the semantic signal was in play for this request.
    pub async fn score_corpus(
        &self,
        query_text: &str,
        corpus: &[Document],
    ) -> (Vec<ScoredCandidate>, bool) {
        let query_clean = normalize::preserve_structure(query_text);
        let query_words = query_clean.split_whitespace().count();
        let query_keywords = extract_keywords(&query_clean);

        let mut resolved = Vec::with_capacity(corpus.len());
        for doc in corpus {
            resolved.push(self.resolve_candidate_text(doc).await);
        }

        let texts: Vec<String> = resolved.iter().map(|(text, _)| text.clone()).collect();
        let lexical_outcomes = batch_similarities(&query_clean, &texts);

        // The embedder handle is resolved once per request; a mid-request
        // failure drops the semantic signal for the remaining candidates
        // instead of failing them.
        let embedder = self.semantic.embedder().cloned();
        let query_embedding = embedder.as_ref().and_then(|e| match e.embed(&query_clean) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(error = %err, "Query embedding failed, continuing without semantic signal");
                None
            }
        });
        let semantic_mode = query_embedding.is_some();
        let mut semantic_ok = semantic_mode;

        let mut scored = Vec::with_capacity(corpus.len());

        for ((doc, (text, methodology)), lexical_outcome) in
            corpus.iter().zip(&resolved).zip(&lexical_outcomes)
        {
            let lexical = match lexical_outcome {
                LexicalOutcome::Scored(value) => *value,
                LexicalOutcome::TooShort => {
                    scored.push(unscored(doc, *methodology, &CandidateOutcome::TooShort));
                    continue;
                }
                LexicalOutcome::InsufficientData => {
                    scored.push(unscored(
                        doc,
                        *methodology,
                        &CandidateOutcome::InsufficientData,
                    ));
                    continue;
                }
            };

            let semantic = if semantic_ok {
                match (&embedder, &query_embedding) {
                    (Some(embedder), Some(query_embedding)) => match embedder.embed(text) {
                        Ok(candidate_embedding) => Some(
                            cosine_similarity(query_embedding, &candidate_embedding)
                                .clamp(0.0, 1.0),
                        ),
                        Err(err) => {
                            warn!(
                                document_id = %doc.id,
                                error = %err,
                                "Candidate embedding failed, dropping semantic signal for the rest of this request"
                            );
                            semantic_ok = false;
                            None
                        }
                    },
                    _ => None,
                }
            } else {
                None
            };

            let candidate_keywords = extract_keywords(text);
            let overlap = keyword_overlap(&query_keywords, &candidate_keywords);
            let length_factor =
                scoring::length_factor(query_words, text.split_whitespace().count());

            let signals = SignalSet {
                semantic,
                lexical,
                keyword_overlap: overlap,
                length_factor,
            };

            if let Err(err) = signals.validate() {
                warn!(document_id = %doc.id, error = %err, "Candidate signal validation failed");
                let outcome = CandidateOutcome::Failed {
                    reason: err.to_string(),
                };
                scored.push(unscored(doc, *methodology, &outcome));
                continue;
            }

            let mut score = scoring::fuse(&signals);

            if *methodology == Methodology::MetadataFallback {
                let title_overlap = scoring::title_token_overlap(&query_clean, &doc.title);
                let boosted = scoring::apply_near_duplicate_boost(score, title_overlap);
                if boosted > score {
                    debug!(
                        document_id = %doc.id,
                        title_overlap,
                        from = score,
                        to = boosted,
                        "Near-duplicate boost applied"
                    );
                }
                score = boosted;
            }

            scored.push(ScoredCandidate {
                document: doc.clone(),
                similarity_score: score.clamp(0.0, SCORE_MAX),
                breakdown: SignalBreakdown {
                    methodology: *methodology,
                    semantic: semantic.map(to_percent),
                    lexical: to_percent(lexical),
                    keyword_overlap: to_percent(overlap),
                    length_factor: round_factor(length_factor),
                    query_keywords: truncated(&query_keywords),
                    candidate_keywords: truncated(&candidate_keywords),
                    reason: None,
                },
            });
        }

        (scored, semantic_mode)
    }

    /// Metadata-only comparison over title + description pairs. Skips
    /// extraction and semantic scoring entirely.
    pub fn check_metadata(
        &self,
        title: &str,
        description: &str,
        corpus: &[Document],
    ) -> MetadataReport {
        let query_raw = format!("{}. {}", title, description);
        let query_word_count = query_raw.split_whitespace().count();
        let query_clean = normalize::aggressive(&query_raw);

        if query_clean.chars().count() < MIN_QUERY_CHARS {
            debug!("Metadata query too short for meaningful comparison");
            return report::build_metadata_report(&[], corpus.len(), query_word_count);
        }

        let texts: Vec<String> = corpus
            .iter()
            .map(|doc| normalize::aggressive(&format!("{}. {}", doc.title, doc.description)))
            .collect();
        let outcomes = batch_similarities(&query_clean, &texts);

        let mut filtered = Vec::new();
        for (doc, outcome) in corpus.iter().zip(&outcomes) {
            let LexicalOutcome::Scored(cosine) = outcome else {
                continue;
            };

            let base = (cosine * 100.0).clamp(0.0, SCORE_MAX);
            let title_overlap = scoring::title_token_overlap(title, &doc.title);
            let score = scoring::apply_near_duplicate_boost(base, title_overlap);

            if score > MIN_METADATA_SCORE {
                filtered.push(ScoredCandidate {
                    document: doc.clone(),
                    similarity_score: score,
                    breakdown: SignalBreakdown {
                        methodology: Methodology::MetadataOnly,
                        semantic: None,
                        lexical: to_percent(*cosine),
                        keyword_overlap: 0.0,
                        length_factor: 1.0,
                        query_keywords: Vec::new(),
                        candidate_keywords: Vec::new(),
                        reason: None,
                    },
                });
            }
        }

        let ranked = report::rank(filtered);
        let report = report::build_metadata_report(&ranked, corpus.len(), query_word_count);

        info!(
            corpus_size = report.corpus_size,
            total_matches = report.total_matches,
            significant_matches = report.significant_matches,
            "Metadata similarity check complete"
        );

        report
    }

    /// Resolves one candidate to comparison text. URL extraction must yield
    /// more than [`MIN_FULL_CONTENT_CHARS`] to count as full content;
    /// anything less falls back to the weighted metadata representation.
    async fn resolve_candidate_text(&self, doc: &Document) -> (String, Methodology) {
        if let Some(url) = doc.url() {
            let content = self.extractor.extract_from_url(url).await;
            if content.trim().chars().count() > MIN_FULL_CONTENT_CHARS {
                return (
                    normalize::preserve_structure(&content),
                    Methodology::FullContent,
                );
            }
            debug!(document_id = %doc.id, "No usable full content, using metadata fallback");
        }

        (
            normalize::preserve_structure(&metadata_text(doc)),
            Methodology::MetadataFallback,
        )
    }
}

/// Weighted metadata representation: the title and tags are repeated to
/// raise their weight, substantial descriptions are included twice.
fn metadata_text(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !doc.title.is_empty() {
        parts.extend(std::iter::repeat_n(doc.title.clone(), TITLE_WEIGHT_REPEATS));
    }

    if !doc.description.is_empty() {
        parts.push(doc.description.clone());
        if doc.description.chars().count() > LONG_DESCRIPTION_CHARS {
            parts.push(doc.description.clone());
        }
    }

    if !doc.tags.is_empty() {
        let tags = doc.tags.join(" ");
        parts.extend(std::iter::repeat_n(tags, TAG_WEIGHT_REPEATS));
    }

    if !doc.author.is_empty() {
        parts.push(format!("Author: {}", doc.author));
    }

    parts.join(". ")
}

fn unscored(doc: &Document, methodology: Methodology, outcome: &CandidateOutcome) -> ScoredCandidate {
    let reason = outcome
        .reason()
        .unwrap_or_else(|| "not comparable".to_string());

    ScoredCandidate {
        document: doc.clone(),
        similarity_score: 0.0,
        breakdown: SignalBreakdown::unscored(methodology, reason),
    }
}

fn to_percent(value: f32) -> f32 {
    (value * 100.0 * 100.0).round() / 100.0
}

fn round_factor(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

fn truncated(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .take(crate::constants::BREAKDOWN_KEYWORD_LIMIT)
        .cloned()
        .collect()
}
