//! Batched TF-IDF lexical similarity.
//!
//! One term-weighted vector space is built per request over
//! `[query] + [all candidate texts]` jointly, so weights reflect the whole
//! batch, then the query vector is compared to each candidate by cosine.
//! Nothing is cached across requests.
//!
//! Tokenization (and the shared stop-word list) also lives here; the keyword
//! extractor reuses it so both signals agree on what a term is.


use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use tracing::debug;

use crate::constants::MIN_COMPARABLE_CHARS;

/// Per-candidate lexical result. The non-scored shapes make the
/// failure-isolation contract type-visible instead of exception-driven.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LexicalOutcome {
    /// Cosine similarity against the query, in `[0, 1]`.
    Scored(f32),
    /// Normalized text shorter than [`MIN_COMPARABLE_CHARS`]; excluded from
    /// vectorization.
    TooShort,
    /// Fewer than two non-empty texts in the whole batch; no vector space
    /// could be built.
    InsufficientData,
}

impl LexicalOutcome {
    /// Similarity value, `0.0` for the non-scored shapes.
    pub fn similarity(&self) -> f32 {
        match self {
            LexicalOutcome::Scored(s) => *s,
            _ => 0.0,
        }
    }
}

/// English stop words excluded from term statistics.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with", "at", "by",
    "from", "as", "into", "through", "during", "before", "after", "above", "below", "between",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "just", "and", "but", "if", "or", "because",
    "until", "while", "what", "which", "who", "whom", "this", "that", "these", "those", "am",
    "it", "its", "we", "our", "you", "your", "they", "their", "he", "she", "his", "her", "i",
    "me", "my", "us",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

pub(crate) fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

/// Splits text into lower-cased word-character runs of at least two
/// characters, stop words removed, input order preserved.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Unigrams plus adjacent bigrams over the tokenized text.
pub(crate) fn terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::with_capacity(tokens.len().saturating_mul(2));
    for window in tokens.windows(2) {
        terms.push(format!("{} {}", window[0], window[1]));
    }
    terms.extend(tokens);
    terms
}

/// Builds l2-normalized TF-IDF vectors (smoothed idf) for a batch of
/// term lists.
pub(crate) fn tfidf_vectors(docs: &[Vec<String>]) -> Vec<HashMap<String, f32>> {
    let n = docs.len() as f32;

    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    docs.iter()
        .map(|doc| {
            let mut weights: HashMap<String, f32> = HashMap::new();
            for term in doc {
                *weights.entry(term.clone()).or_insert(0.0) += 1.0;
            }

            for (term, weight) in weights.iter_mut() {
                let d = df.get(term.as_str()).copied().unwrap_or(1) as f32;
                let idf = ((1.0 + n) / (1.0 + d)).ln() + 1.0;
                *weight *= idf;
            }

            let norm: f32 = weights.values().map(|w| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for weight in weights.values_mut() {
                    *weight /= norm;
                }
            }

            weights
        })
        .collect()
}

/// Cosine similarity between two sparse vectors.
pub(crate) fn cosine_sparse(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f32 = small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum();

    let norm_a: f32 = a.values().map(|w| w * w).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|w| w * w).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores every candidate against the query in one batched pass.
///
/// Candidates below [`MIN_COMPARABLE_CHARS`] are excluded from the vector
/// space and reported [`LexicalOutcome::TooShort`]. If fewer than two
/// non-empty texts exist overall, the remaining candidates are reported
/// [`LexicalOutcome::InsufficientData`] rather than an error.
pub fn batch_similarities(query_text: &str, candidate_texts: &[String]) -> Vec<LexicalOutcome> {
    enum Slot {
        Valid(usize),
        TooShort,
    }

    let mut slots = Vec::with_capacity(candidate_texts.len());
    let mut valid_terms: Vec<Vec<String>> = Vec::new();

    for text in candidate_texts {
        if text.trim().chars().count() < MIN_COMPARABLE_CHARS {
            slots.push(Slot::TooShort);
        } else {
            slots.push(Slot::Valid(valid_terms.len()));
            valid_terms.push(terms(text));
        }
    }

    let query_non_empty = !query_text.trim().is_empty();
    let non_empty_texts = usize::from(query_non_empty) + valid_terms.len();

    if non_empty_texts < 2 {
        debug!(
            candidates = candidate_texts.len(),
            non_empty_texts, "Insufficient texts for lexical comparison"
        );
        return slots
            .iter()
            .map(|slot| match slot {
                Slot::TooShort => LexicalOutcome::TooShort,
                Slot::Valid(_) => LexicalOutcome::InsufficientData,
            })
            .collect();
    }

    let mut docs = Vec::with_capacity(valid_terms.len() + 1);
    docs.push(terms(query_text));
    docs.append(&mut valid_terms);

    let vectors = tfidf_vectors(&docs);

    slots
        .iter()
        .map(|slot| match slot {
            Slot::TooShort => LexicalOutcome::TooShort,
            Slot::Valid(i) => {
                let cosine = cosine_sparse(&vectors[0], &vectors[i + 1]);
                LexicalOutcome::Scored(cosine.clamp(0.0, 1.0))
            }
        })
        .collect()
}
