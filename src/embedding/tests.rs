use std::sync::Arc;
use std::time::Duration;

use super::cache::{Clock, EmbeddingCache, ManualClock};
use super::client::EmbeddingClient;
use super::error::EmbeddingError;
use super::provider::MockEmbeddingProvider;
use super::types::{BatchOptions, EmbedOptions, EmbeddingResult};

const TTL: Duration = Duration::from_secs(3600);

fn mock_client() -> EmbeddingClient<MockEmbeddingProvider> {
    EmbeddingClient::with_provider(MockEmbeddingProvider::new(), TTL)
}

fn sample_result(model: &str) -> EmbeddingResult {
    EmbeddingResult {
        embedding: vec![0.1, 0.2, 0.3],
        tokens_used: 7,
        model: model.to_string(),
        cost_estimate: 0.0000014,
    }
}

#[test]
fn test_cache_key_normalizes_text() {
    assert_eq!(
        EmbeddingCache::key_for("m", "  Hello World  "),
        EmbeddingCache::key_for("m", "hello world")
    );
    assert_ne!(
        EmbeddingCache::key_for("model-a", "hello"),
        EmbeddingCache::key_for("model-b", "hello")
    );
}

#[test]
fn test_cache_hit_within_ttl_and_lazy_eviction_after() {
    let clock = Arc::new(ManualClock::new(1_000));
    let cache = EmbeddingCache::with_clock(TTL, clock.clone());

    let key = EmbeddingCache::key_for("m", "text");
    cache.insert(key.clone(), sample_result("m"));

    clock.advance(TTL - Duration::from_millis(1));
    assert!(cache.get(&key).is_some());

    clock.advance(Duration::from_millis(1));
    // now - inserted_at == ttl counts as expired.
    assert!(cache.get(&key).is_none());
    // Eviction happened on lookup, not just a negative answer.
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_cache_stats_track_age_bounds() {
    let clock = Arc::new(ManualClock::new(5_000));
    let cache = EmbeddingCache::with_clock(TTL, clock.clone());
    assert_eq!(cache.stats().entry_count, 0);
    assert_eq!(cache.stats().oldest_entry_ms, None);

    cache.insert("m:a".to_string(), sample_result("m"));
    clock.advance(Duration::from_millis(2_500));
    cache.insert("m:b".to_string(), sample_result("m"));

    let stats = cache.stats();
    assert_eq!(stats.entry_count, 2);
    assert_eq!(stats.oldest_entry_ms, Some(5_000));
    assert_eq!(stats.newest_entry_ms, Some(7_500));
    assert!(stats.approx_size_bytes > 0);

    cache.clear();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_generate_embedding_validates_input() {
    let client = mock_client();

    let err = client
        .generate_embedding("   ", &EmbedOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EmbeddingError::Validation { .. }));

    let oversized = "x".repeat(8001);
    let err = client
        .generate_embedding(&oversized, &EmbedOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EmbeddingError::Validation { .. }));

    // Validation failures never reach the provider.
    assert_eq!(client.provider().call_count(), 0);
}

#[tokio::test]
async fn test_input_cap_counts_characters_not_bytes() {
    let client = mock_client();

    // 4001 two-byte characters: 8002 bytes but well under the 8000-character cap.
    let multibyte = "é".repeat(4001);
    assert!(multibyte.len() > 8000);
    let result = client
        .generate_embedding(&multibyte, &EmbedOptions::default())
        .await;
    assert!(result.is_ok());

    // One character over the cap still fails, regardless of encoding.
    let over = "é".repeat(8001);
    let err = client
        .generate_embedding(&over, &EmbedOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EmbeddingError::Validation { .. }));
    assert!(err.to_string().contains("8001 characters"));
}

#[tokio::test]
async fn test_cache_idempotence_single_provider_call() {
    let client = mock_client();
    let opts = EmbedOptions::default();

    let first = client.generate_embedding("hello world", &opts).await.unwrap();
    let second = client.generate_embedding("hello world", &opts).await.unwrap();

    assert_eq!(client.provider().call_count(), 1);
    assert_eq!(first.embedding, second.embedding);
    assert_eq!(first.model, opts.model);
    assert!(first.cost_estimate > 0.0);
}

#[tokio::test]
async fn test_expired_ttl_triggers_second_provider_call() {
    let clock = Arc::new(ManualClock::new(0));
    let shared: Arc<dyn Clock> = clock.clone();
    let client = EmbeddingClient::with_provider_and_clock(
        MockEmbeddingProvider::new(),
        Duration::from_secs(60),
        shared,
    );
    let opts = EmbedOptions::default();

    client.generate_embedding("hello", &opts).await.unwrap();
    clock.advance(Duration::from_secs(61));
    client.generate_embedding("hello", &opts).await.unwrap();

    assert_eq!(client.provider().call_count(), 2);
}

#[tokio::test]
async fn test_cache_bypass_when_disabled() {
    let client = mock_client();
    let opts = EmbedOptions {
        use_cache: false,
        ..Default::default()
    };

    client.generate_embedding("hello", &opts).await.unwrap();
    client.generate_embedding("hello", &opts).await.unwrap();
    assert_eq!(client.provider().call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_retry_then_succeed() {
    let provider = MockEmbeddingProvider::new().fail_with(vec![
        EmbeddingError::ProviderTransient {
            message: "503 service unavailable".to_string(),
        },
        EmbeddingError::MalformedResponse {
            reason: "empty data array".to_string(),
        },
    ]);
    let client = EmbeddingClient::with_provider(provider, TTL);

    let result = client
        .generate_embedding("retry me", &EmbedOptions::default())
        .await
        .unwrap();

    assert_eq!(client.provider().call_count(), 3);
    assert!(!result.embedding.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted_wraps_last_error() {
    let provider = MockEmbeddingProvider::new().fail_with(vec![
        EmbeddingError::ProviderTransient { message: "timeout".to_string() },
        EmbeddingError::ProviderTransient { message: "timeout".to_string() },
        EmbeddingError::ProviderTransient { message: "final timeout".to_string() },
    ]);
    let client = EmbeddingClient::with_provider(provider, TTL);

    let err = client
        .generate_embedding("doomed", &EmbedOptions::default())
        .await
        .unwrap_err();

    assert_eq!(client.provider().call_count(), 3);
    match err {
        EmbeddingError::ExhaustedRetries { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(source.to_string().contains("final timeout"));
        }
        other => panic!("expected ExhaustedRetries, got {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_errors_abort_without_retry() {
    let provider = MockEmbeddingProvider::new().fail_with(vec![EmbeddingError::ProviderAuth {
        message: "invalid api key".to_string(),
    }]);
    let client = EmbeddingClient::with_provider(provider, TTL);

    let err = client
        .generate_embedding("no retry", &EmbedOptions::default())
        .await
        .unwrap_err();

    assert_eq!(client.provider().call_count(), 1);
    assert!(matches!(err, EmbeddingError::ProviderAuth { .. }));
}

#[test]
fn test_error_message_classification_fallback() {
    assert!(matches!(
        EmbeddingError::from_provider_message("You exceeded your current quota".to_string()),
        EmbeddingError::ProviderAuth { .. }
    ));
    assert!(matches!(
        EmbeddingError::from_provider_message("billing hard limit reached".to_string()),
        EmbeddingError::ProviderAuth { .. }
    ));
    assert!(matches!(
        EmbeddingError::from_provider_message("upstream connect error".to_string()),
        EmbeddingError::ProviderTransient { .. }
    ));
}

#[test]
fn test_rate_limit_messages_stay_retryable_unless_quota() {
    // Plain rate limiting should be retried; only quota or billing
    // exhaustion aborts the retry loop.
    let throttled = EmbeddingError::from_provider_message(
        "Rate limit reached for requests, please slow down".to_string(),
    );
    assert!(matches!(throttled, EmbeddingError::ProviderTransient { .. }));
    assert!(throttled.is_retryable());

    let exhausted = EmbeddingError::from_provider_message(
        "You exceeded your current quota, please check your plan and billing".to_string(),
    );
    assert!(matches!(exhausted, EmbeddingError::ProviderAuth { .. }));
    assert!(!exhausted.is_retryable());
}

#[test]
fn test_retryability_predicate() {
    assert!(EmbeddingError::ProviderTransient { message: String::new() }.is_retryable());
    assert!(EmbeddingError::MalformedResponse { reason: String::new() }.is_retryable());
    assert!(!EmbeddingError::Validation { reason: String::new() }.is_retryable());
    assert!(!EmbeddingError::ProviderAuth { message: String::new() }.is_retryable());
}

#[tokio::test]
async fn test_batch_preserves_length_and_order() {
    let client = mock_client();
    let opts = BatchOptions::default();

    let texts: Vec<String> = (0..7).map(|i| format!("text number {i}")).collect();
    let results = client.generate_embeddings_batch(&texts, &opts).await.unwrap();

    assert_eq!(results.len(), texts.len());
    for (text, result) in texts.iter().zip(&results) {
        assert_eq!(result.embedding, client.provider().vector_for(text));
    }
}

#[tokio::test]
async fn test_batch_merges_cached_and_fresh_in_order() {
    let client = mock_client();
    let single_opts = EmbedOptions::default();
    let batch_opts = BatchOptions::default();

    // Pre-warm two entries so the batch interleaves hits and misses.
    client.generate_embedding("alpha", &single_opts).await.unwrap();
    client.generate_embedding("gamma", &single_opts).await.unwrap();
    assert_eq!(client.provider().call_count(), 2);

    let texts: Vec<String> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let results = client.generate_embeddings_batch(&texts, &batch_opts).await.unwrap();

    // One more provider call covering only the two misses.
    assert_eq!(client.provider().call_count(), 3);
    assert_eq!(results.len(), 4);
    for (text, result) in texts.iter().zip(&results) {
        assert_eq!(result.embedding, client.provider().vector_for(text));
    }
}

#[tokio::test]
async fn test_batch_all_hits_skips_provider() {
    let client = mock_client();
    let opts = BatchOptions::default();

    let texts = vec!["one".to_string(), "two".to_string()];
    client.generate_embeddings_batch(&texts, &opts).await.unwrap();
    let calls_after_warmup = client.provider().call_count();

    client.generate_embeddings_batch(&texts, &opts).await.unwrap();
    assert_eq!(client.provider().call_count(), calls_after_warmup);
}

#[tokio::test]
async fn test_batch_chunks_large_inputs() {
    let client = mock_client();
    let opts = BatchOptions {
        batch_size: 3,
        use_cache: false,
        ..Default::default()
    };

    let texts: Vec<String> = (0..8).map(|i| format!("chunked text {i}")).collect();
    let results = client.generate_embeddings_batch(&texts, &opts).await.unwrap();

    // 8 texts at batch size 3: three provider calls, order intact.
    assert_eq!(client.provider().call_count(), 3);
    assert_eq!(results.len(), 8);
    for (text, result) in texts.iter().zip(&results) {
        assert_eq!(result.embedding, client.provider().vector_for(text));
    }
}

#[tokio::test]
async fn test_tokens_estimated_from_length_when_usage_present() {
    let client = mock_client();
    let result = client
        .generate_embedding("twelve chars", &EmbedOptions::default())
        .await
        .unwrap();

    // Mock reports ceil(len/4) usage for a single input.
    assert_eq!(result.tokens_used, 3);
    assert!((result.cost_estimate - 3.0 / 1000.0 * 0.00002).abs() < 1e-12);
}
