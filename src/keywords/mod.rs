//! Salient-term extraction via weighted term statistics.


use std::cmp::Ordering;
use std::collections::HashSet;

use crate::constants::KEYWORD_LIMIT;
use crate::lexical;

/// Extracts up to [`KEYWORD_LIMIT`] salient terms (unigrams and bigrams),
/// ordered by weight descending.
///
/// Weights come from TF-IDF over a synthetic two-document corpus formed by
/// duplicating the input; the weighting scheme needs at least two documents
/// to produce non-degenerate weights for a single text. Ties break on the
/// term itself, so identical input always yields the identical ordered list.
///
/// Degenerate input (no usable terms) falls back to plain lower-cased
/// whitespace tokens longer than three characters, first ten, in input order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let terms = lexical::terms(text);
    if terms.is_empty() {
        return fallback_keywords(text);
    }

    let vectors = lexical::tfidf_vectors(&[terms.clone(), terms]);
    let weights = match vectors.into_iter().next() {
        Some(w) if !w.is_empty() => w,
        _ => return fallback_keywords(text),
    };

    let mut ranked: Vec<(String, f32)> = weights.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .filter(|(_, weight)| *weight > 0.0)
        .take(KEYWORD_LIMIT)
        .map(|(term, _)| term)
        .collect()
}

fn fallback_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap between two keyword lists, in `[0, 1]`.
pub fn keyword_overlap(a: &[String], b: &[String]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}
