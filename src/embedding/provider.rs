//! Embedding provider seam.
//!
//! [`EmbeddingProvider`] is the single network boundary of the engine.
//! [`OpenAiProvider`] speaks the OpenAI-compatible embeddings wire format;
//! the mock implementation records calls and serves deterministic vectors
//! for tests.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::EmbeddingError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call output of a provider request, one embedding per input.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub embeddings: Vec<Vec<f32>>,
    /// Total tokens across all inputs, when the provider reports usage.
    pub total_tokens: Option<u32>,
}

/// The embedding network boundary.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Requests one embedding per input, in input order.
    async fn embed(&self, model: &str, inputs: &[String])
    -> Result<ProviderResponse, EmbeddingError>;
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Option<Vec<EmbeddingDatum>>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Option<Vec<f32>>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// OpenAI-compatible HTTP embedding provider.
pub struct OpenAiProvider {
    http: HttpClient,
    endpoint_url: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Creates a provider for an embeddings endpoint.
    ///
    /// `endpoint_url` is the full embeddings URL (e.g.
    /// `https://api.openai.com/v1/embeddings`).
    pub fn new(endpoint_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            endpoint_url: endpoint_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(
        &self,
        model: &str,
        inputs: &[String],
    ) -> Result<ProviderResponse, EmbeddingError> {
        debug!(model, num_inputs = inputs.len(), "Requesting embeddings");

        let request = EmbeddingsRequest {
            model,
            input: inputs,
            encoding_format: "float",
        };

        let response = self
            .http
            .post(&self.endpoint_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let provider_message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {status}"));

            // 429 covers both transient rate limiting and exhausted quota;
            // the message text decides which.
            return Err(match status.as_u16() {
                401 | 402 | 403 => EmbeddingError::ProviderAuth {
                    message: provider_message,
                },
                _ => EmbeddingError::from_provider_message(provider_message),
            });
        }

        let parsed: EmbeddingsResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let data = parsed
            .data
            .filter(|d| !d.is_empty())
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                reason: "response contains no data array".to_string(),
            })?;

        let embeddings = data
            .into_iter()
            .map(|datum| {
                datum
                    .embedding
                    .ok_or_else(|| EmbeddingError::MalformedResponse {
                        reason: "data item missing embedding field".to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProviderResponse {
            embeddings,
            total_tokens: parsed.usage.and_then(|u| u.total_tokens),
        })
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory provider for tests: deterministic vectors derived from
    /// the input text, a call counter, and an optional script of failures
    /// consumed before any success.
    pub struct MockEmbeddingProvider {
        calls: AtomicUsize,
        scripted_failures: Mutex<Vec<EmbeddingError>>,
        dim: usize,
    }

    impl Default for MockEmbeddingProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockEmbeddingProvider {
        pub fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                scripted_failures: Mutex::new(Vec::new()),
                dim: 8,
            }
        }

        /// Queues errors returned (in order) before successes resume.
        pub fn fail_with(self, failures: Vec<EmbeddingError>) -> Self {
            *self.scripted_failures.lock() = failures;
            self
        }

        /// Number of `embed` calls issued so far.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Deterministic unit-normalized vector for `text`.
        pub fn vector_for(&self, text: &str) -> Vec<f32> {
            let mut seed = 0u64;
            for byte in text.trim().to_lowercase().bytes() {
                seed = seed.wrapping_mul(31).wrapping_add(byte as u64);
            }
            let raw: Vec<f32> = (0..self.dim)
                .map(|i| ((seed.rotate_left(i as u32) % 1000) as f32 + 1.0) / 1000.0)
                .collect();
            let norm = raw.iter().map(|v| v * v).sum::<f32>().sqrt();
            raw.iter().map(|v| v / norm).collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(
            &self,
            _model: &str,
            inputs: &[String],
        ) -> Result<ProviderResponse, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let mut scripted = self.scripted_failures.lock();
            if !scripted.is_empty() {
                return Err(scripted.remove(0));
            }
            drop(scripted);

            let embeddings = inputs.iter().map(|text| self.vector_for(text)).collect();
            let total_tokens = inputs.iter().map(|t| (t.len() as u32).div_ceil(4)).sum();

            Ok(ProviderResponse {
                embeddings,
                total_tokens: Some(total_tokens),
            })
        }
    }
}
