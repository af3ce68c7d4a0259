//! Shared blocking transport for all provider clients.
//!
//! Every remote call gets the same hardening: a bounded per-request
//! timeout and at most one retry, taken only when the failure class is
//! plausibly transient (transport, timeout, 429, 5xx). The retry waits a
//! base backoff plus uniform jitter so synchronized callers spread out.

use std::thread;
use std::time::Duration;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use civica_core::config::ProviderConfig;
use civica_core::errors::{CivicaResult, PipelineError, ProviderError};

/// Backoff parameters for the single retry.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub base_backoff_ms: u64,
    pub jitter_ms: u64,
}

impl RetryPolicy {
    /// Base backoff plus uniform jitter in `[0, jitter_ms]`.
    pub fn backoff(&self) -> Duration {
        let jitter = rand::rng().random_range(0..=self.jitter_ms);
        Duration::from_millis(self.base_backoff_ms + jitter)
    }
}

/// A reqwest wrapper enforcing the timeout and retry policy.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
    timeout_secs: u64,
}

impl HttpClient {
    pub fn new(config: &ProviderConfig) -> CivicaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| PipelineError::Config {
                reason: format!("http client construction failed: {e}"),
            })?;
        Ok(Self {
            client,
            retry: RetryPolicy {
                base_backoff_ms: config.retry_base_backoff_ms,
                jitter_ms: config.retry_jitter_ms,
            },
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// POST a JSON body and parse a JSON reply. Retries once on a
    /// retryable failure; permanent failures surface immediately.
    pub fn post_json<B, R>(
        &self,
        provider: &str,
        url: &str,
        headers: &[(&str, String)],
        body: &B,
    ) -> CivicaResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        match self.attempt(provider, url, headers, body) {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_retryable() => {
                let backoff = self.retry.backoff();
                warn!(
                    provider,
                    error = %e,
                    backoff_ms = backoff.as_millis() as u64,
                    "retryable provider failure, retrying once"
                );
                thread::sleep(backoff);
                self.attempt(provider, url, headers, body)
                    .map_err(Into::into)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn attempt<B, R>(
        &self,
        provider: &str,
        url: &str,
        headers: &[(&str, String)],
        body: &B,
    ) -> Result<R, ProviderError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().map_err(|e| self.classify(provider, e))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ProviderError::Http {
                provider: provider.to_string(),
                status: status.as_u16(),
                message: truncate_body(&message),
            });
        }

        debug!(provider, url, status = status.as_u16(), "provider call ok");
        response
            .json::<R>()
            .map_err(|e| ProviderError::MalformedResponse {
                provider: provider.to_string(),
                reason: e.to_string(),
            })
    }

    fn classify(&self, provider: &str, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                provider: provider.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ProviderError::Transport {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Error bodies can be arbitrarily large; keep diagnostics bounded.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        body.chars().take(MAX).collect()
    }
}

/// Read the API key named by `env_var`, surfacing a permanent error when
/// unset so the stage fallback answers instead of a retry storm.
pub fn api_key_from_env(provider: &str, env_var: &str) -> Result<String, ProviderError> {
    std::env::var(env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderError::MissingCredentials {
            provider: provider.to_string(),
            env_var: env_var.to_string(),
        })
}
