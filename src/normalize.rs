//! Text normalization.
//!
//! Two canonical forms feed the scoring pipeline: a structure-preserving one
//! for the lexical/semantic signals and an aggressive one for the
//! metadata-only path. Both are pure functions.

/// Safe punctuation kept by [`preserve_structure`]. Everything else becomes
/// a space so sentence boundaries survive cleaning.
const SAFE_PUNCTUATION: [char; 7] = ['.', ',', ';', ':', '"', '\'', '-'];

/// Cleans text while keeping sentence structure intact.
///
/// Word characters, whitespace and the safe punctuation set survive; any
/// other character is replaced with a space. Whitespace runs collapse to a
/// single space and the result is trimmed.
pub fn preserve_structure(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || SAFE_PUNCTUATION.contains(&c)
            {
                c
            } else {
                ' '
            }
        })
        .collect();

    collapse_whitespace(&cleaned)
}

/// Aggressive cleaning for the metadata-only path: strips all punctuation,
/// lower-cases, collapses whitespace.
pub fn aggressive(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
        .collect();

    collapse_whitespace(&cleaned).to_lowercase()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
