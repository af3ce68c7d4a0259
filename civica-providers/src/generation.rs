//! Text generation over the Anthropic messages API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use civica_core::config::ProviderConfig;
use civica_core::errors::{CivicaResult, ProviderError};
use civica_core::models::{Role, Turn};
use civica_core::traits::ITextGenerator;

use crate::http::{api_key_from_env, HttpClient};

const PROVIDER: &str = "anthropic";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<WireMessage>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// `ITextGenerator` backed by the Anthropic messages endpoint.
pub struct AnthropicGenerator {
    http: HttpClient,
    config: ProviderConfig,
}

impl AnthropicGenerator {
    pub fn new(config: ProviderConfig) -> CivicaResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    fn extract_text(response: MessagesResponse) -> Result<String, ProviderError> {
        let text: String = response
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: "no text content in reply".to_string(),
            });
        }
        Ok(text)
    }
}

impl ITextGenerator for AnthropicGenerator {
    fn generate(&self, system_instruction: &str, turns: &[Turn]) -> CivicaResult<String> {
        let api_key = api_key_from_env(PROVIDER, &self.config.generation_api_key_env)?;
        let request = MessagesRequest {
            model: &self.config.generation_model,
            max_tokens: self.config.generation_max_tokens,
            system: system_instruction,
            messages: turns
                .iter()
                .map(|turn| WireMessage {
                    role: wire_role(turn.role),
                    content: turn.text.clone(),
                })
                .collect(),
        };

        let url = format!("{}/v1/messages", self.config.generation_base_url);
        let headers = [
            ("x-api-key", api_key),
            ("anthropic-version", API_VERSION.to_string()),
        ];
        let response: MessagesResponse =
            self.http.post_json(PROVIDER, &url, &headers, &request)?;
        let text = Self::extract_text(response)?;
        debug!(model = %self.config.generation_model, chars = text.len(), "generation ok");
        Ok(text)
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    fn is_available(&self) -> bool {
        api_key_from_env(PROVIDER, &self.config.generation_api_key_env).is_ok()
    }
}
