//! # civica-providers
//!
//! HTTP clients for the three remote capabilities the pipeline depends
//! on: text generation (Anthropic messages API), embeddings
//! (OpenAI-compatible `/v1/embeddings`), and vector search (Milvus v2
//! REST). Each client implements the corresponding `civica-core` trait
//! and shares one hardened transport: bounded timeout, at most one retry
//! with jittered backoff.

pub mod embedding;
pub mod generation;
pub mod http;
pub mod index;

pub use embedding::OpenAiEmbeddings;
pub use generation::AnthropicGenerator;
pub use http::HttpClient;
pub use index::MilvusIndex;
