//! Query embeddings over an OpenAI-compatible `/v1/embeddings` endpoint.
//!
//! The vector dimension is fixed at deployment time and must agree with
//! the index collection; a reply with any other length is rejected
//! before it can reach the index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use civica_core::config::ProviderConfig;
use civica_core::errors::{CivicaResult, ProviderError};
use civica_core::traits::IEmbeddingProvider;

use crate::http::{api_key_from_env, HttpClient};

const PROVIDER: &str = "openai-embeddings";

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// `IEmbeddingProvider` backed by a remote embeddings endpoint.
pub struct OpenAiEmbeddings {
    http: HttpClient,
    config: ProviderConfig,
}

impl OpenAiEmbeddings {
    pub fn new(config: ProviderConfig) -> CivicaResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    fn extract_vector(
        &self,
        mut response: EmbeddingsResponse,
    ) -> Result<Vec<f32>, ProviderError> {
        let row = response
            .data
            .pop()
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: "empty data array".to_string(),
            })?;
        if row.embedding.len() != self.config.embedding_dimensions {
            return Err(ProviderError::DimensionMismatch {
                provider: PROVIDER.to_string(),
                expected: self.config.embedding_dimensions,
                actual: row.embedding.len(),
            });
        }
        Ok(row.embedding)
    }
}

impl IEmbeddingProvider for OpenAiEmbeddings {
    fn embed(&self, text: &str) -> CivicaResult<Vec<f32>> {
        let api_key = api_key_from_env(PROVIDER, &self.config.embedding_api_key_env)?;
        let request = EmbeddingsRequest {
            model: &self.config.embedding_model,
            input: [text],
            dimensions: self.config.embedding_dimensions,
        };

        let url = format!("{}/v1/embeddings", self.config.embedding_base_url);
        let headers = [("Authorization", format!("Bearer {api_key}"))];
        let response: EmbeddingsResponse =
            self.http.post_json(PROVIDER, &url, &headers, &request)?;
        let vector = self.extract_vector(response)?;
        debug!(model = %self.config.embedding_model, dims = vector.len(), "embedding ok");
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.config.embedding_dimensions
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    fn is_available(&self) -> bool {
        api_key_from_env(PROVIDER, &self.config.embedding_api_key_env).is_ok()
    }
}
