use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Empty or oversized input text. Never retried.
    #[error("invalid embedding input: {reason}")]
    Validation { reason: String },

    /// Bad API key, quota exhaustion, or billing failure. Never retried;
    /// the provider message is propagated verbatim.
    #[error("embedding provider rejected credentials: {message}")]
    ProviderAuth { message: String },

    /// Timeouts, 5xx responses, connection failures. Retried with backoff.
    #[error("embedding provider request failed: {message}")]
    ProviderTransient { message: String },

    /// Response parsed but missing the expected shape. Counted against
    /// retry attempts since it may be a transient provider glitch.
    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    /// All retry attempts consumed; wraps the last underlying error.
    #[error("embedding failed after {attempts} attempts: {source}")]
    ExhaustedRetries {
        attempts: usize,
        #[source]
        source: Box<EmbeddingError>,
    },
}

impl EmbeddingError {
    /// Whether the retry loop should attempt again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::ProviderTransient { .. } | EmbeddingError::MalformedResponse { .. }
        )
    }

    /// Classifies a provider error message, falling back on substring
    /// matching for providers that only signal auth/quota/billing problems
    /// through message text.
    pub fn from_provider_message(message: String) -> Self {
        let lowered = message.to_lowercase();
        let non_retryable = ["api key", "unauthorized", "authentication", "quota", "billing"]
            .iter()
            .any(|marker| lowered.contains(marker));

        if non_retryable {
            EmbeddingError::ProviderAuth { message }
        } else {
            EmbeddingError::ProviderTransient { message }
        }
    }
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::ProviderTransient {
            message: err.to_string(),
        }
    }
}
