use serde::{Deserialize, Serialize};

use crate::constants::{
    RISK_COSINE_CRITICAL, RISK_COSINE_HIGH, RISK_COSINE_MEDIUM, RISK_JACCARD_CRITICAL,
    RISK_JACCARD_HIGH, RISK_JACCARD_MEDIUM,
};

/// Ordinal risk label for a single reference comparison.
///
/// The thresholds are fixed constants: [`crate::OriginalityConfig`] gates
/// the final pass/fail decision, never the per-reference labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classifies a (cosine, jaccard) pair, most severe rule first.
    pub fn classify(cosine: f32, jaccard: f32) -> Self {
        if cosine > RISK_COSINE_CRITICAL || jaccard > RISK_JACCARD_CRITICAL {
            RiskLevel::Critical
        } else if cosine > RISK_COSINE_HIGH || jaccard > RISK_JACCARD_HIGH {
            RiskLevel::High
        } else if cosine > RISK_COSINE_MEDIUM || jaccard > RISK_JACCARD_MEDIUM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Returns `true` for [`RiskLevel::High`] and [`RiskLevel::Critical`].
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// Short wire-format string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
