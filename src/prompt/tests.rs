use super::augment_prompt;
use crate::scoring::{OriginalityConfig, OriginalityScorer, ReferenceContent};

fn scorer() -> OriginalityScorer {
    OriginalityScorer::new()
}

#[test]
fn test_original_result_returns_prompt_unchanged() {
    let result = scorer().check_originality(
        "a completely clean and novel story about distant travels and rain",
        &[],
        &OriginalityConfig::default(),
        None,
    );
    assert!(result.is_original);

    let prompt = "Write a short adventure set in a coastal town.";
    assert_eq!(augment_prompt(&result, prompt), prompt);
}

#[test]
fn test_failed_result_appends_requirements_section() {
    let text = "the ancient castle stood on the hill above the misty valley below";
    let result = scorer().check_originality(
        text,
        &[ReferenceContent::new("r", text)],
        &OriginalityConfig::default(),
        None,
    );
    assert!(!result.is_original);

    let prompt = "Write a short adventure set in a coastal town.";
    let augmented = augment_prompt(&result, prompt);

    assert!(augmented.starts_with(prompt));
    assert!(augmented.contains("ORIGINALITY REQUIREMENTS:"));
    // Both similarity failures contribute their bullet groups.
    assert!(augmented.contains("different structure and vocabulary"));
    assert!(augmented.contains("five or more consecutive words"));
    // Generic creativity bullets are always present on failure.
    assert!(augmented.contains("distinctive voice of your own"));
    assert!(augmented.contains("creative reinterpretation"));
}

#[test]
fn test_leakage_only_failure_includes_leakage_bullets() {
    let result = scorer().check_originality(
        "a fresh narrative that unfortunately links to https://example.com",
        &[],
        &OriginalityConfig::default(),
        None,
    );
    assert!(!result.is_original);
    assert!(result.source_leakage_detected);

    let augmented = augment_prompt(&result, "Generate a scene.");

    assert!(augmented.contains("Never include URLs"));
    // Similarity did not fail, so those groups are absent.
    assert!(!augmented.contains("different structure and vocabulary"));
    assert!(!augmented.contains("five or more consecutive words"));
}

#[test]
fn test_augmentation_is_deterministic() {
    let text = "the ancient castle stood on the hill above the misty valley below";
    let result = scorer().check_originality(
        text,
        &[ReferenceContent::new("r", text)],
        &OriginalityConfig::default(),
        None,
    );

    let a = augment_prompt(&result, "Same prompt.");
    let b = augment_prompt(&result, "Same prompt.");
    assert_eq!(a, b);
}
