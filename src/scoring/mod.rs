//! Originality scoring.
//!
//! [`OriginalityScorer`] orchestrates [`crate::similarity`] and
//! [`crate::leakage`] across one generated text and N references,
//! producing an [`OriginalityResult`] with a per-reference breakdown and
//! remediation hints.

mod risk;
mod scorer;
mod types;


pub use risk::RiskLevel;
pub use scorer::{
    OriginalityScorer, RECOMMEND_COSINE, RECOMMEND_JACCARD, RECOMMEND_LEAKAGE, RECOMMEND_SCORE,
};
pub use types::{OriginalityConfig, OriginalityResult, ReferenceContent, SimilarityCheck};
