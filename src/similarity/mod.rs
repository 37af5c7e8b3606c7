//! Pure numeric and lexical similarity functions.
//!
//! Everything here is deterministic and free of I/O: cosine similarity over
//! embedding vectors, 5-word-shingle Jaccard similarity, a term-frequency
//! cosine fallback for when no embeddings are available, and verbatim
//! overlapping-phrase extraction.

mod error;


pub use error::SimilarityError;

use std::collections::{HashMap, HashSet};

use crate::constants::{
    MAX_PHRASE_WORDS, MAX_REPORTED_PHRASES, MIN_PHRASE_CHARS, SHINGLE_SIZE,
};

/// Cosine similarity of two equal-length vectors.
///
/// Unequal lengths are a programmer error and fail hard; callers holding
/// heterogeneous stored embeddings must check lengths before calling.
/// Returns `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}

/// Splits text into lowercase word tokens.
///
/// Deterministic by construction: splits on any non-alphanumeric character,
/// so the same input always yields the same token sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity over 5-word shingles of the two texts.
///
/// Returns `0.0` when both shingle sets are empty (texts shorter than one
/// shingle).
pub fn shingle_jaccard(text_a: &str, text_b: &str) -> f32 {
    let shingles_a = shingle_set(&tokenize(text_a), SHINGLE_SIZE);
    let shingles_b = shingle_set(&tokenize(text_b), SHINGLE_SIZE);

    if shingles_a.is_empty() && shingles_b.is_empty() {
        return 0.0;
    }

    let intersection = shingles_a.intersection(&shingles_b).count();
    let union = shingles_a.union(&shingles_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

fn shingle_set(tokens: &[String], size: usize) -> HashSet<String> {
    if tokens.len() < size {
        return HashSet::new();
    }
    tokens.windows(size).map(|w| w.join(" ")).collect()
}

/// Term-frequency cosine similarity over the union vocabulary of both texts.
///
/// A degraded, dependency-free substitute for true embedding similarity,
/// used only when the caller supplied no embeddings and semantic checks are
/// enabled. Each vector component is that word's count divided by the
/// text's total word count.
pub fn term_frequency_similarity(text_a: &str, text_b: &str) -> f32 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(&tokens_a);
    let counts_b = term_counts(&tokens_b);

    let mut vocabulary: Vec<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();
    vocabulary.sort_unstable();
    vocabulary.dedup();

    let total_a = tokens_a.len() as f32;
    let total_b = tokens_b.len() as f32;

    let vec_a: Vec<f32> = vocabulary
        .iter()
        .map(|w| counts_a.get(w).copied().unwrap_or(0) as f32 / total_a)
        .collect();
    let vec_b: Vec<f32> = vocabulary
        .iter()
        .map(|w| counts_b.get(w).copied().unwrap_or(0) as f32 / total_b)
        .collect();

    // Vectors are built over the same vocabulary, so lengths always match.
    cosine_similarity(&vec_a, &vec_b).unwrap_or(0.0)
}

fn term_counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Word sequences of length `min_words..=8` present verbatim in both texts.
///
/// Matching is case-insensitive over the shared tokenizer. Phrases must
/// exceed 15 characters; the result is deduplicated, sorted longest first
/// (lexicographic on ties so output is stable), and capped at 5 entries.
///
/// Quadratic over the shingle windows, which is fine for paragraph-sized
/// inputs; not meant for documents of more than a few thousand words.
pub fn overlapping_phrases(text_a: &str, text_b: &str, min_words: usize) -> Vec<String> {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    let max_words = MAX_PHRASE_WORDS.min(tokens_a.len()).min(tokens_b.len());
    if min_words > max_words {
        return Vec::new();
    }

    let mut found = HashSet::new();
    for n in min_words..=max_words {
        let windows_a: HashSet<String> = tokens_a.windows(n).map(|w| w.join(" ")).collect();
        for window in tokens_b.windows(n) {
            let phrase = window.join(" ");
            if phrase.len() > MIN_PHRASE_CHARS && windows_a.contains(&phrase) {
                found.insert(phrase);
            }
        }
    }

    let mut phrases: Vec<String> = found.into_iter().collect();
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.truncate(MAX_REPORTED_PHRASES);
    phrases
}
