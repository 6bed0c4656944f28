//! Text normalization for question comparison
//!
//! Imported documents arrive with typographic quotes and precomposed accents
//! that would defeat naive string equality. Every question string is pushed
//! through the same pipeline before comparison: NFKD decomposition, curly
//! quote unification, trim. Dedup keys additionally fold case.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for storage and comparison: NFKD decomposition,
/// typographic quotes mapped to straight ASCII quotes, surrounding
/// whitespace stripped.
pub fn normalize(s: &str) -> String {
    let decomposed: String = s.nfkd().collect();
    decomposed
        .replace('\u{2019}', "'")
        .replace('\u{2018}', "'")
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"")
        .trim()
        .to_string()
}

/// Key used for duplicate detection: normalized text, case-folded.
pub fn dedup_key(s: &str) -> String {
    normalize(s).to_lowercase()
}
