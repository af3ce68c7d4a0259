/// Errors from the three remote capability providers
/// (text generation, embeddings, vector index).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider}: HTTP {status}: {message}")]
    Http {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider}: transport error: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider}: request timed out after {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },

    #[error("{provider}: quota exhausted")]
    QuotaExhausted { provider: String },

    #[error("{provider}: request rejected by content policy: {reason}")]
    ContentPolicy { provider: String, reason: String },

    #[error("{provider}: malformed response: {reason}")]
    MalformedResponse { provider: String, reason: String },

    #[error("{provider}: missing credentials (set {env_var})")]
    MissingCredentials { provider: String, env_var: String },

    #[error("{provider}: embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        provider: String,
        expected: usize,
        actual: usize,
    },
}

impl ProviderError {
    /// Whether a retry could plausibly succeed. Content-policy rejections,
    /// bad credentials, and malformed payloads are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::QuotaExhausted { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::ContentPolicy { .. }
            | Self::MalformedResponse { .. }
            | Self::MissingCredentials { .. }
            | Self::DimensionMismatch { .. } => false,
        }
    }
}
