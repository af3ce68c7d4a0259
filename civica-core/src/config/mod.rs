//! Configuration for the advisory pipeline and its providers.
//!
//! All structs deserialize with `#[serde(default)]` so a partial TOML
//! file overrides only what it names.

pub mod defaults;

mod pipeline_config;
mod provider_config;

pub use pipeline_config::PipelineConfig;
pub use provider_config::ProviderConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{CivicaResult, PipelineError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CivicaConfig {
    pub pipeline: PipelineConfig,
    pub providers: ProviderConfig,
}

impl CivicaConfig {
    /// Parse a TOML document, falling back to defaults for absent keys.
    pub fn from_toml_str(content: &str) -> CivicaResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PipelineError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CivicaResult<()> {
        if self.pipeline.top_k == 0 {
            return Err(PipelineError::Config {
                reason: "pipeline.top_k must be at least 1".to_string(),
            }
            .into());
        }
        if self.providers.embedding_dimensions == 0 {
            return Err(PipelineError::Config {
                reason: "providers.embedding_dimensions must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = CivicaConfig::from_toml_str("").expect("defaults");
        assert_eq!(config.pipeline.top_k, defaults::DEFAULT_TOP_K);
        assert_eq!(
            config.providers.index_collection,
            defaults::DEFAULT_INDEX_COLLECTION
        );
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = CivicaConfig::from_toml_str(
            r#"
            [pipeline]
            top_k = 10

            [providers]
            index_base_url = "http://milvus.internal:19530"
            "#,
        )
        .expect("partial config");
        assert_eq!(config.pipeline.top_k, 10);
        assert_eq!(config.providers.index_base_url, "http://milvus.internal:19530");
        assert_eq!(
            config.pipeline.synthesis_top_n,
            defaults::DEFAULT_SYNTHESIS_TOP_N
        );
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = CivicaConfig::from_toml_str("[pipeline]\ntop_k = 0\n").unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }
}
