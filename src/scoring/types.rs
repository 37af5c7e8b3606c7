use serde::{Deserialize, Serialize};

use super::risk::RiskLevel;

/// Per-call thresholds gating the pass/fail decision.
///
/// Immutable for the duration of a check and supplied by the caller.
/// Thresholds are plain bounds and are not validated here: out-of-range
/// values make the check more permissive or more restrictive, never an
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalityConfig {
    /// Highest acceptable cosine similarity against any reference (0–1).
    pub max_cosine_similarity: f32,
    /// Highest acceptable 5-gram Jaccard similarity (0–1).
    pub max_jaccard_similarity: f32,
    /// Lowest acceptable composite score (0–100).
    pub min_originality_score: u8,
    /// Whether source-leakage markers fail the check.
    pub block_source_disclosure: bool,
    /// Whether to fall back to term-frequency similarity when no
    /// embeddings were supplied.
    pub enable_semantic_checks: bool,
}

impl Default for OriginalityConfig {
    /// Conservative defaults for gating publication of generated content.
    fn default() -> Self {
        Self {
            max_cosine_similarity: 0.85,
            max_jaccard_similarity: 0.25,
            min_originality_score: 70,
            block_source_disclosure: true,
            enable_semantic_checks: true,
        }
    }
}

/// One reference document to compare generated text against.
///
/// Constructed by the caller per check; never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceContent {
    /// Opaque identifier, unique within a single call.
    pub id: String,
    /// Human-readable title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Reference text. Expected non-empty.
    pub content: String,
    /// Precomputed embedding, if the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Optional category tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ReferenceContent {
    /// Creates a reference with just an id and content.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            content: content.into(),
            embedding: None,
            category: None,
        }
    }

    /// Attaches a precomputed embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Attaches a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Similarity breakdown for one reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityCheck {
    pub reference_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_title: Option<String>,
    pub cosine_similarity: f32,
    pub jaccard_similarity: f32,
    /// Up to 5 verbatim overlaps, longest first.
    pub overlapping_phrases: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Outcome of an originality check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalityResult {
    /// `true` only when every gating condition passed.
    pub is_original: bool,
    /// Composite score, 0–100 (clean-text ceiling is 84).
    pub overall_score: u8,
    /// Maximum cosine similarity observed across all references.
    pub cosine_similarity: f32,
    /// Maximum Jaccard similarity observed across all references.
    pub jaccard_similarity: f32,
    pub source_leakage_detected: bool,
    /// One entry per reference, in input order.
    pub similarity_checks: Vec<SimilarityCheck>,
    /// Human-readable failure reasons; each appears at most once.
    pub recommendations: Vec<String>,
}

impl OriginalityResult {
    /// Returns the highest risk level across all references, if any.
    pub fn max_risk_level(&self) -> Option<RiskLevel> {
        self.similarity_checks.iter().map(|c| c.risk_level).max()
    }
}
