//! Veracity: originality verification for AI-generated content.
//!
//! Scores generated text against reference material before it reaches end
//! users, combining embedding cosine similarity, 5-gram Jaccard
//! similarity, a term-frequency fallback, and source-leakage heuristics
//! into a single pass/fail decision with remediation hints.
//!
//! # Public API Surface
//!
//! ## Scoring
//! - [`OriginalityScorer`], [`OriginalityConfig`], [`OriginalityResult`],
//!   [`SimilarityCheck`], [`ReferenceContent`], [`RiskLevel`]
//!
//! ## Embedding acquisition
//! - [`EmbeddingClient`], [`EmbedOptions`], [`BatchOptions`],
//!   [`EmbeddingResult`], [`EmbeddingError`]
//! - [`EmbeddingProvider`] — the network seam; [`OpenAiProvider`] speaks
//!   the OpenAI-compatible embeddings wire format
//! - [`EmbeddingCache`], [`CacheStats`], [`Clock`] — operator-facing cache
//!   surface with an injectable clock
//!
//! ## Feedback loop
//! - [`augment_prompt`] rewrites a generation prompt after a failed check
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] — env-backed provider configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod leakage;
pub mod prompt;
pub mod scoring;
pub mod similarity;

pub use config::{Config, ConfigError, DEFAULT_ENDPOINT_URL};
pub use embedding::{
    BatchOptions, CacheStats, Clock, EmbedOptions, EmbeddingCache, EmbeddingClient,
    EmbeddingError, EmbeddingProvider, EmbeddingResult, OpenAiProvider, ProviderResponse,
    SystemClock,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{ManualClock, MockEmbeddingProvider};
pub use leakage::{detect_source_leakage, leakage_matches};
pub use prompt::augment_prompt;
pub use scoring::{
    OriginalityConfig, OriginalityResult, OriginalityScorer, ReferenceContent, RiskLevel,
    SimilarityCheck,
};
pub use similarity::{
    SimilarityError, cosine_similarity, overlapping_phrases, shingle_jaccard,
    term_frequency_similarity,
};
