use tracing::{debug, warn};

use crate::constants::{
    LEAKAGE_CLEAN_SCORE, MIN_PHRASE_WORDS, SCORE_WEIGHT_COSINE, SCORE_WEIGHT_JACCARD,
    SCORE_WEIGHT_LEAKAGE,
};
use crate::leakage::detect_source_leakage;
use crate::similarity::{cosine_similarity, overlapping_phrases, shingle_jaccard, term_frequency_similarity};

use super::risk::RiskLevel;
use super::types::{OriginalityConfig, OriginalityResult, ReferenceContent, SimilarityCheck};

/// Recommendation emitted when cosine similarity exceeds the configured cap.
pub const RECOMMEND_COSINE: &str = "Content is too semantically similar to reference material. \
     Rephrase the key ideas with a different structure and vocabulary.";

/// Recommendation emitted when Jaccard similarity exceeds the configured cap.
pub const RECOMMEND_JACCARD: &str = "Content shares too many exact phrases with reference material. \
     Rework the overlapping passages in different wording.";

/// Recommendation emitted when source leakage was detected.
pub const RECOMMEND_LEAKAGE: &str = "Content appears to disclose source material (URLs, citations, or \
     quoted passages). Remove them and integrate the information naturally.";

/// Recommendation emitted when the composite score falls below the minimum.
pub const RECOMMEND_SCORE: &str = "Overall originality score is below the required minimum. \
     Increase creative distance from the source material.";

/// Multi-metric originality scorer.
///
/// Stateless per call: combines cosine similarity, 5-gram Jaccard
/// similarity, and source-leakage detection across one generated text and
/// N references into a single pass/fail decision with a per-reference
/// breakdown. Performs no I/O and never suspends; embedding acquisition is
/// the caller's concern (see [`crate::EmbeddingClient`]).
#[derive(Debug, Clone, Default)]
pub struct OriginalityScorer;

impl OriginalityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Checks `generated` against `references` under `config`.
    ///
    /// References are processed and reported strictly in input order.
    /// Business-logic conditions never fail the call: a reference whose
    /// stored embedding has the wrong dimension degrades to a cosine of 0
    /// rather than aborting the whole check.
    pub fn check_originality(
        &self,
        generated: &str,
        references: &[ReferenceContent],
        config: &OriginalityConfig,
        generated_embedding: Option<&[f32]>,
    ) -> OriginalityResult {
        debug!(
            text_len = generated.len(),
            num_references = references.len(),
            semantic_checks = config.enable_semantic_checks,
            has_embedding = generated_embedding.is_some(),
            "Starting originality check"
        );

        let mut checks = Vec::with_capacity(references.len());
        let mut max_cosine = 0.0f32;
        let mut max_jaccard = 0.0f32;

        for reference in references {
            let cosine = self.reference_cosine(generated, reference, config, generated_embedding);
            let jaccard = shingle_jaccard(generated, &reference.content);
            let phrases = overlapping_phrases(generated, &reference.content, MIN_PHRASE_WORDS);
            let risk_level = RiskLevel::classify(cosine, jaccard);

            max_cosine = max_cosine.max(cosine);
            max_jaccard = max_jaccard.max(jaccard);

            checks.push(SimilarityCheck {
                reference_id: reference.id.clone(),
                reference_title: reference.title.clone(),
                cosine_similarity: cosine,
                jaccard_similarity: jaccard,
                overlapping_phrases: phrases,
                risk_level,
            });
        }

        // Leakage is a property of the generated text alone, checked once.
        let source_leakage_detected =
            config.block_source_disclosure && detect_source_leakage(generated);

        let cosine_score = ((1.0 - max_cosine) * 100.0).max(0.0);
        let jaccard_score = ((1.0 - max_jaccard) * 100.0).max(0.0);
        let leakage_score = if source_leakage_detected {
            0.0
        } else {
            LEAKAGE_CLEAN_SCORE
        };

        let overall_score = (cosine_score * SCORE_WEIGHT_COSINE
            + jaccard_score * SCORE_WEIGHT_JACCARD
            + leakage_score * SCORE_WEIGHT_LEAKAGE)
            .round()
            .clamp(0.0, 100.0) as u8;

        let mut recommendations = Vec::new();
        if max_cosine > config.max_cosine_similarity {
            recommendations.push(RECOMMEND_COSINE.to_string());
        }
        if max_jaccard > config.max_jaccard_similarity {
            recommendations.push(RECOMMEND_JACCARD.to_string());
        }
        if source_leakage_detected {
            recommendations.push(RECOMMEND_LEAKAGE.to_string());
        }
        if overall_score < config.min_originality_score {
            recommendations.push(RECOMMEND_SCORE.to_string());
        }

        let is_original = recommendations.is_empty();

        debug!(
            is_original,
            overall_score,
            max_cosine,
            max_jaccard,
            source_leakage_detected,
            "Originality check complete"
        );

        OriginalityResult {
            is_original,
            overall_score,
            cosine_similarity: max_cosine,
            jaccard_similarity: max_jaccard,
            source_leakage_detected,
            similarity_checks: checks,
            recommendations,
        }
    }

    /// Cosine similarity for one reference, in order of preference: true
    /// embeddings when both sides are present, the term-frequency fallback
    /// when semantic checks are enabled, otherwise 0.
    fn reference_cosine(
        &self,
        generated: &str,
        reference: &ReferenceContent,
        config: &OriginalityConfig,
        generated_embedding: Option<&[f32]>,
    ) -> f32 {
        if let (Some(gen_emb), Some(ref_emb)) = (generated_embedding, reference.embedding.as_deref())
        {
            // Stored reference embeddings come from heterogeneous, possibly
            // stale data; a wrong dimension degrades this reference instead
            // of aborting the whole check.
            if gen_emb.len() != ref_emb.len() {
                warn!(
                    reference_id = %reference.id,
                    expected_dim = gen_emb.len(),
                    actual_dim = ref_emb.len(),
                    "Embedding dimension mismatch; treating reference cosine as 0"
                );
                return 0.0;
            }
            return cosine_similarity(gen_emb, ref_emb).unwrap_or(0.0);
        }

        if config.enable_semantic_checks {
            term_frequency_similarity(generated, &reference.content)
        } else {
            0.0
        }
    }
}
