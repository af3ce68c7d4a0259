use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote provider endpoints, models, and call hardening knobs.
/// API keys are named by environment variable, never stored in config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub generation_base_url: String,
    pub generation_model: String,
    pub generation_max_tokens: u32,
    pub generation_api_key_env: String,

    pub embedding_base_url: String,
    pub embedding_model: String,
    /// Fixed dimension D agreed with the index at deployment time.
    pub embedding_dimensions: usize,
    pub embedding_api_key_env: String,

    pub index_base_url: String,
    pub index_collection: String,

    /// Per-request timeout applied at every remote call boundary.
    pub request_timeout_secs: u64,
    /// Base backoff before the single retry.
    pub retry_base_backoff_ms: u64,
    /// Uniform jitter added on top of the base backoff.
    pub retry_jitter_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            generation_base_url: defaults::DEFAULT_GENERATION_BASE_URL.to_string(),
            generation_model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            generation_max_tokens: defaults::DEFAULT_GENERATION_MAX_TOKENS,
            generation_api_key_env: defaults::DEFAULT_GENERATION_KEY_ENV.to_string(),
            embedding_base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            embedding_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            embedding_api_key_env: defaults::DEFAULT_EMBEDDING_KEY_ENV.to_string(),
            index_base_url: defaults::DEFAULT_INDEX_BASE_URL.to_string(),
            index_collection: defaults::DEFAULT_INDEX_COLLECTION.to_string(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            retry_base_backoff_ms: defaults::DEFAULT_RETRY_BASE_BACKOFF_MS,
            retry_jitter_ms: defaults::DEFAULT_RETRY_JITTER_MS,
        }
    }
}
