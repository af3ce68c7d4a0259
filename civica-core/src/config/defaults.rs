//! Default values referenced by the config structs.

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_SYNTHESIS_TOP_N: usize = 3;
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 200;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_BASE_BACKOFF_MS: u64 = 250;
pub const DEFAULT_RETRY_JITTER_MS: u64 = 250;

pub const DEFAULT_GENERATION_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_GENERATION_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_GENERATION_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_GENERATION_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_INDEX_BASE_URL: &str = "http://localhost:19530";
pub const DEFAULT_INDEX_COLLECTION: &str = "program_embeddings";
