use serde::{Deserialize, Serialize};

/// A government support program record as stored in the vector index.
/// Owned by the index and the relational store; the pipeline never
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub eligibility_age_min: Option<u32>,
    pub eligibility_age_max: Option<u32>,
    pub eligibility_regions: Vec<String>,
    pub application_url: String,
}

/// One nearest-neighbor hit from the vector index, in the index's native
/// score space. The retriever normalizes `raw_score` per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub record_id: String,
    pub raw_score: f64,
    pub payload: ProgramRecord,
}
