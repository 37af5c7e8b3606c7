//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//! The risk thresholds and score weights are fixed properties of the
//! classifier, independent of the per-call [`crate::OriginalityConfig`].

/// Shingle size used for lexical (Jaccard) similarity.
pub const SHINGLE_SIZE: usize = 5;

/// Minimum phrase length (in words) considered by overlap extraction.
pub const MIN_PHRASE_WORDS: usize = 4;

/// Maximum phrase length (in words) considered by overlap extraction.
pub const MAX_PHRASE_WORDS: usize = 8;

/// Overlapping phrases must exceed this many characters to be reported.
pub const MIN_PHRASE_CHARS: usize = 15;

/// Maximum number of overlapping phrases reported per reference.
pub const MAX_REPORTED_PHRASES: usize = 5;

/// Cosine thresholds for risk classification, most severe first.
pub const RISK_COSINE_CRITICAL: f32 = 0.9;
pub const RISK_COSINE_HIGH: f32 = 0.8;
pub const RISK_COSINE_MEDIUM: f32 = 0.6;

/// Jaccard thresholds for risk classification, most severe first.
pub const RISK_JACCARD_CRITICAL: f32 = 0.3;
pub const RISK_JACCARD_HIGH: f32 = 0.2;
pub const RISK_JACCARD_MEDIUM: f32 = 0.1;

/// Weights of the composite originality score. The leakage term is a flat
/// 20-or-0 weighted at 0.2, so a fully clean text tops out at 84.
pub const SCORE_WEIGHT_COSINE: f32 = 0.4;
pub const SCORE_WEIGHT_JACCARD: f32 = 0.4;
pub const SCORE_WEIGHT_LEAKAGE: f32 = 0.2;

/// Score contribution when no source leakage was detected.
pub const LEAKAGE_CLEAN_SCORE: f32 = 20.0;

/// Maximum input length accepted by the embedding client, in characters.
pub const MAX_EMBEDDING_INPUT_CHARS: usize = 8000;

/// Default number of provider attempts before giving up.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Base delay between provider attempts, doubled per attempt.
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Upper bound on the inter-attempt delay.
pub const RETRY_MAX_DELAY_MS: u64 = 5000;

/// Default embedding model requested from the provider.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default batch size for [`crate::EmbeddingClient::generate_embeddings_batch`].
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default cache TTL for embedding results, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// USD price per 1K tokens, by model. Unknown models fall back to
/// [`DEFAULT_PRICE_PER_K_TOKENS`].
pub const MODEL_PRICES_PER_K_TOKENS: &[(&str, f64)] = &[
    ("text-embedding-3-small", 0.00002),
    ("text-embedding-3-large", 0.00013),
    ("text-embedding-ada-002", 0.0001),
];

/// Fallback price for models absent from [`MODEL_PRICES_PER_K_TOKENS`].
pub const DEFAULT_PRICE_PER_K_TOKENS: f64 = 0.0001;

/// Looks up the per-1K-token price for `model`.
pub fn price_per_k_tokens(model: &str) -> f64 {
    MODEL_PRICES_PER_K_TOKENS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_PRICE_PER_K_TOKENS)
}
