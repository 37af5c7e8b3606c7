//! Embedding acquisition.
//!
//! - [`EmbeddingClient`] — caching, bounded retry with backoff, batching.
//! - [`provider`] — the network seam ([`OpenAiProvider`] + test mock).
//! - [`cache`] — injectable TTL cache with an operator-facing surface.

mod cache;
mod client;
mod error;
/// Provider trait and wire types.
pub mod provider;
mod types;

#[cfg(test)]
mod tests;

pub use cache::{CacheStats, Clock, EmbeddingCache, SystemClock};
#[cfg(any(test, feature = "mock"))]
pub use cache::ManualClock;
pub use client::EmbeddingClient;
pub use error::EmbeddingError;
pub use provider::{EmbeddingProvider, OpenAiProvider, ProviderResponse};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockEmbeddingProvider;
pub use types::{BatchOptions, EmbedOptions, EmbeddingResult};
