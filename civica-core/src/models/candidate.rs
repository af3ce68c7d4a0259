use serde::{Deserialize, Serialize};

/// A retrieved program record with a normalized similarity score
/// (higher is better). Emitted by the retriever in index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub record_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub score: f64,
    /// One-line eligibility assessment against the user's profile,
    /// present when the profile allowed one to be computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_note: Option<String>,
}
