use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which pipeline stage produced a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStage {
    Engine,
    Router,
    Retriever,
    Synthesizer,
}

impl TraceStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Router => "router",
            Self::Retriever => "retriever",
            Self::Synthesizer => "synthesizer",
        }
    }
}

/// Append-only observability record. Every stage appends exactly one
/// entry per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub stage: TraceStage,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    /// Free-form stage detail (result counts, rewritten query, reply length).
    pub detail: serde_json::Value,
}

impl TraceEntry {
    pub fn new(stage: TraceStage, action: impl Into<String>, detail: serde_json::Value) -> Self {
        Self {
            stage,
            action: action.into(),
            timestamp: Utc::now(),
            detail,
        }
    }
}
