use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{
    MAX_EMBEDDING_INPUT_CHARS, RETRY_BASE_DELAY_MS, RETRY_MAX_DELAY_MS, price_per_k_tokens,
};

use super::cache::{CacheStats, Clock, EmbeddingCache};
use super::error::EmbeddingError;
use super::provider::{EmbeddingProvider, OpenAiProvider, ProviderResponse};
use super::types::{BatchOptions, EmbedOptions, EmbeddingResult};

/// Embedding acquisition with caching, bounded retry, and batching.
///
/// Generic over the provider so tests can drive the retry and batch logic
/// without a network. The cache is owned by the client and shared freely
/// across concurrent calls.
pub struct EmbeddingClient<P: EmbeddingProvider = OpenAiProvider> {
    provider: P,
    cache: EmbeddingCache,
}

impl EmbeddingClient<OpenAiProvider> {
    /// Creates a client over the OpenAI-compatible HTTP provider.
    pub fn new(config: &Config) -> Self {
        Self::with_provider(
            OpenAiProvider::new(&config.endpoint_url, config.api_key.as_deref().unwrap_or("")),
            config.cache_ttl,
        )
    }
}

impl<P: EmbeddingProvider> EmbeddingClient<P> {
    /// Creates a client over an arbitrary provider.
    pub fn with_provider(provider: P, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: EmbeddingCache::new(cache_ttl),
        }
    }

    /// Creates a client with an injected clock for deterministic TTL tests.
    pub fn with_provider_and_clock(
        provider: P,
        cache_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            cache: EmbeddingCache::with_clock(cache_ttl, clock),
        }
    }

    /// Access to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Acquires one embedding, consulting the cache first.
    ///
    /// Fails fast on invalid input and on auth/quota/billing errors;
    /// retries transient and malformed-response failures up to
    /// `opts.max_retries` attempts with exponential backoff between
    /// attempts (1 s base, doubling, capped at 5 s, none before the
    /// first).
    pub async fn generate_embedding(
        &self,
        text: &str,
        opts: &EmbedOptions,
    ) -> Result<EmbeddingResult, EmbeddingError> {
        validate_input(text)?;

        let key = EmbeddingCache::key_for(&opts.model, text);
        if opts.use_cache {
            if let Some(cached) = self.cache.get(&key) {
                debug!(model = %opts.model, "Embedding cache hit");
                return Ok(cached);
            }
        }

        let inputs = [text.to_string()];
        let response = self
            .call_with_retries(&opts.model, &inputs, opts.max_retries)
            .await?;

        let mut results = self.results_from_response(&opts.model, &inputs, response)?;
        // results_from_response yields exactly one result per input.
        let result = results.remove(0);

        if opts.use_cache {
            self.cache.insert(key, result.clone());
        }

        Ok(result)
    }

    /// Acquires embeddings for many texts, order-preserving.
    ///
    /// Splits the input into `opts.batch_size` chunks, and within each
    /// chunk issues a single provider call covering only the cache misses,
    /// scattering fresh results back to their original indices. Output
    /// length and order always match the input.
    pub async fn generate_embeddings_batch(
        &self,
        texts: &[String],
        opts: &BatchOptions,
    ) -> Result<Vec<EmbeddingResult>, EmbeddingError> {
        for text in texts {
            validate_input(text)?;
        }

        let batch_size = opts.batch_size.max(1);
        let mut results = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(batch_size) {
            results.extend(self.embed_chunk(chunk, opts).await?);
        }

        Ok(results)
    }

    async fn embed_chunk(
        &self,
        texts: &[String],
        opts: &BatchOptions,
    ) -> Result<Vec<EmbeddingResult>, EmbeddingError> {
        let mut output: Vec<Option<EmbeddingResult>> = vec![None; texts.len()];
        let mut miss_indices = Vec::new();
        let mut miss_texts = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            let key = EmbeddingCache::key_for(&opts.model, text);
            match opts.use_cache.then(|| self.cache.get(&key)).flatten() {
                Some(cached) => output[index] = Some(cached),
                None => {
                    miss_indices.push(index);
                    miss_texts.push(text.clone());
                }
            }
        }

        debug!(
            model = %opts.model,
            total = texts.len(),
            hits = texts.len() - miss_texts.len(),
            misses = miss_texts.len(),
            "Embedding batch chunk"
        );

        if !miss_texts.is_empty() {
            let response = self
                .call_with_retries(&opts.model, &miss_texts, crate::constants::DEFAULT_MAX_RETRIES)
                .await?;
            let fresh = self.results_from_response(&opts.model, &miss_texts, response)?;

            for ((slot, text), result) in miss_indices.iter().zip(miss_texts.iter()).zip(fresh) {
                if opts.use_cache {
                    self.cache
                        .insert(EmbeddingCache::key_for(&opts.model, text), result.clone());
                }
                output[*slot] = Some(result);
            }
        }

        // Every index is either a cache hit or was just scattered back.
        Ok(output.into_iter().flatten().collect())
    }

    async fn call_with_retries(
        &self,
        model: &str,
        inputs: &[String],
        max_retries: usize,
    ) -> Result<ProviderResponse, EmbeddingError> {
        let max_attempts = max_retries.max(1);
        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = backoff_delay(attempt);
                debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying embedding request");
                tokio::time::sleep(delay).await;
            }

            match self.provider.embed(model, inputs).await {
                Ok(response) => {
                    if attempt > 1 {
                        info!(attempt, "Embedding request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(err) if err.is_retryable() => {
                    warn!(attempt, error = %err, "Embedding attempt failed");
                    last_error = Some(err);
                }
                Err(err) => {
                    warn!(error = %err, "Embedding request failed; not retrying");
                    return Err(err);
                }
            }
        }

        // last_error is always set: the loop only exits after at least one
        // retryable failure.
        Err(EmbeddingError::ExhaustedRetries {
            attempts: max_attempts,
            source: Box::new(last_error.unwrap_or(EmbeddingError::ProviderTransient {
                message: "no attempts were made".to_string(),
            })),
        })
    }

    fn results_from_response(
        &self,
        model: &str,
        inputs: &[String],
        response: ProviderResponse,
    ) -> Result<Vec<EmbeddingResult>, EmbeddingError> {
        if response.embeddings.len() != inputs.len() {
            return Err(EmbeddingError::MalformedResponse {
                reason: format!(
                    "expected {} embeddings, got {}",
                    inputs.len(),
                    response.embeddings.len()
                ),
            });
        }

        let total_chars: usize = inputs.iter().map(|t| t.len()).sum();
        let total_tokens = response
            .total_tokens
            .unwrap_or_else(|| (total_chars as u32).div_ceil(4));
        let price = price_per_k_tokens(model);

        Ok(inputs
            .iter()
            .zip(response.embeddings)
            .map(|(text, embedding)| {
                // Apportion reported usage by character share; estimate
                // ceil(len/4) when the provider reported nothing.
                let tokens_used = if response.total_tokens.is_some() && total_chars > 0 {
                    ((total_tokens as u64 * text.len() as u64) / total_chars.max(1) as u64) as u32
                } else {
                    (text.len() as u32).div_ceil(4)
                };

                EmbeddingResult {
                    embedding,
                    tokens_used,
                    model: model.to_string(),
                    cost_estimate: f64::from(tokens_used) / 1000.0 * price,
                }
            })
            .collect())
    }

    /// Empties the embedding cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Operational snapshot of the embedding cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn validate_input(text: &str) -> Result<(), EmbeddingError> {
    if text.trim().is_empty() {
        return Err(EmbeddingError::Validation {
            reason: "text is empty".to_string(),
        });
    }
    // The cap is in characters, not bytes; multibyte text must not be
    // penalized for its encoding.
    let chars = text.chars().count();
    if chars > MAX_EMBEDDING_INPUT_CHARS {
        return Err(EmbeddingError::Validation {
            reason: format!(
                "text is {chars} characters, maximum is {MAX_EMBEDDING_INPUT_CHARS}"
            ),
        });
    }
    Ok(())
}

/// Delay before `attempt` (1-based): 1 s base doubling per retry, 5 s cap.
fn backoff_delay(attempt: usize) -> Duration {
    let exponent = attempt.saturating_sub(2).min(31) as u32;
    let delay_ms = (RETRY_BASE_DELAY_MS * 2u64.pow(exponent)).min(RETRY_MAX_DELAY_MS);
    Duration::from_millis(delay_ms)
}

impl<P: EmbeddingProvider + std::fmt::Debug> std::fmt::Debug for EmbeddingClient<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingClient")
            .field("provider", &self.provider)
            .field("cache", &self.cache)
            .finish()
    }
}
