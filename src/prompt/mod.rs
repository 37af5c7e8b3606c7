//! Prompt augmentation for the regeneration feedback loop.
//!
//! When a check fails, the caller can rewrite its generation prompt with
//! corrective instructions and try again. Which instruction groups are
//! appended depends on which checks failed, read off the result's
//! recommendation set.

#[cfg(test)]
mod tests;

use crate::scoring::{
    OriginalityResult, RECOMMEND_COSINE, RECOMMEND_JACCARD, RECOMMEND_LEAKAGE,
};

const COSINE_BULLETS: &[&str] = &[
    "Express the underlying ideas with a fundamentally different structure and vocabulary",
    "Do not mirror the framing or order of presentation of any source",
];

const JACCARD_BULLETS: &[&str] = &[
    "Avoid reusing runs of five or more consecutive words from any source",
    "Replace distinctive wording with formulations of your own",
];

const LEAKAGE_BULLETS: &[&str] = &[
    "Never include URLs, citations, page numbers, or quoted passages",
    "Present information as original narrative, not as referenced material",
];

const GENERIC_BULLETS: &[&str] = &[
    "Write in a distinctive voice of your own",
    "Prioritize creative reinterpretation over faithful restatement",
];

/// Appends corrective instructions to `original_prompt` when `result`
/// failed the originality check.
///
/// Returns `original_prompt` unchanged (byte for byte) when
/// `result.is_original` is true. Deterministic: the same result and prompt
/// always produce the same output.
pub fn augment_prompt(result: &OriginalityResult, original_prompt: &str) -> String {
    if result.is_original {
        return original_prompt.to_string();
    }

    let failed = |message: &str| result.recommendations.iter().any(|r| r == message);

    let mut bullets: Vec<&str> = Vec::new();
    if failed(RECOMMEND_COSINE) {
        bullets.extend(COSINE_BULLETS);
    }
    if failed(RECOMMEND_JACCARD) {
        bullets.extend(JACCARD_BULLETS);
    }
    if failed(RECOMMEND_LEAKAGE) {
        bullets.extend(LEAKAGE_BULLETS);
    }
    bullets.extend(GENERIC_BULLETS);

    let mut augmented = String::with_capacity(original_prompt.len() + 64 * bullets.len());
    augmented.push_str(original_prompt);
    augmented.push_str("\n\nORIGINALITY REQUIREMENTS:\n");
    for bullet in bullets {
        augmented.push_str("- ");
        augmented.push_str(bullet);
        augmented.push('\n');
    }

    augmented
}
