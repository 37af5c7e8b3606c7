use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_RETRIES};

/// One acquired embedding plus its provenance and cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingResult {
    pub embedding: Vec<f32>,
    pub tokens_used: u32,
    /// Model identifier that produced the vector.
    pub model: String,
    /// Estimated USD cost of the provider call share for this text.
    pub cost_estimate: f64,
}

/// Options for [`crate::EmbeddingClient::generate_embedding`].
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    pub model: String,
    pub use_cache: bool,
    /// Provider attempts before giving up. Default 3.
    pub max_retries: usize,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            use_cache: true,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl EmbedOptions {
    /// Options for a specific model, other fields defaulted.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Options derived from a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            use_cache: true,
            max_retries: config.max_retries,
        }
    }
}

/// Options for [`crate::EmbeddingClient::generate_embeddings_batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub model: String,
    /// Maximum texts per provider call. Default 100.
    pub batch_size: usize,
    pub use_cache: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            use_cache: true,
        }
    }
}
