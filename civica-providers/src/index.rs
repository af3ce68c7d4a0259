//! Nearest-neighbor search over the Milvus v2 REST API.
//!
//! The collection stores one entity per program record with a COSINE
//! metric. Milvus reports a cosine *similarity* in its `distance` field
//! (1.0 is an exact match), so `raw_score` carries it unchanged and the
//! metric is declared as pass-through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use civica_core::config::ProviderConfig;
use civica_core::errors::{CivicaResult, ProviderError};
use civica_core::models::{ProgramRecord, SearchHit};
use civica_core::traits::{IVectorIndex, SimilarityMetric};

use crate::http::HttpClient;

const PROVIDER: &str = "milvus";

const OUTPUT_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "category",
    "region",
    "eligibility_age_min",
    "eligibility_age_max",
    "eligibility_regions",
    "application_url",
];

#[derive(Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "collectionName")]
    collection_name: &'a str,
    data: [&'a [f32]; 1],
    limit: usize,
    #[serde(rename = "outputFields")]
    output_fields: &'a [&'a str],
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Vec<Value>,
}

/// `IVectorIndex` backed by a Milvus collection.
pub struct MilvusIndex {
    http: HttpClient,
    config: ProviderConfig,
}

impl MilvusIndex {
    pub fn new(config: ProviderConfig) -> CivicaResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    fn parse_hits(response: SearchResponse) -> Result<Vec<SearchHit>, ProviderError> {
        if response.code != 0 {
            return Err(ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: format!("search error code {}: {}", response.code, response.message),
            });
        }
        response.data.into_iter().map(parse_row).collect()
    }
}

/// One result row: `distance` plus the requested output fields, flat.
fn parse_row(row: Value) -> Result<SearchHit, ProviderError> {
    let raw_score = row
        .get("distance")
        .and_then(Value::as_f64)
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER.to_string(),
            reason: "result row missing numeric distance".to_string(),
        })?;
    let payload: ProgramRecord =
        serde_json::from_value(row).map_err(|e| ProviderError::MalformedResponse {
            provider: PROVIDER.to_string(),
            reason: format!("unparseable result row: {e}"),
        })?;
    Ok(SearchHit {
        record_id: payload.id.clone(),
        raw_score,
        payload,
    })
}

impl IVectorIndex for MilvusIndex {
    fn search(&self, query_vector: &[f32], top_k: usize) -> CivicaResult<Vec<SearchHit>> {
        let request = SearchRequest {
            collection_name: &self.config.index_collection,
            data: [query_vector],
            limit: top_k,
            output_fields: OUTPUT_FIELDS,
        };

        let url = format!("{}/v2/vectordb/entities/search", self.config.index_base_url);
        let response: SearchResponse = self.http.post_json(PROVIDER, &url, &[], &request)?;
        let hits = Self::parse_hits(response)?;
        debug!(
            collection = %self.config.index_collection,
            hits = hits.len(),
            "vector search ok"
        );
        Ok(hits)
    }

    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::CosineSimilarity
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_v2_shape() {
        let vector = [0.1f32, 0.2];
        let request = SearchRequest {
            collection_name: "program_embeddings",
            data: [&vector],
            limit: 5,
            output_fields: OUTPUT_FIELDS,
        };
        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["collectionName"], "program_embeddings");
        assert_eq!(json["limit"], 5);
        assert_eq!(json["outputFields"][1], "title");
    }

    #[test]
    fn rows_parse_into_hits_with_raw_distance() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "code": 0,
                "data": [
                    {"distance": 0.12, "id": "PRG-001", "title": "Youth Savings Match",
                     "description": "matched savings", "category": "finance",
                     "region": "Seoul"},
                    {"distance": 0.40, "id": "PRG-002", "title": "Student Scholarship Fund"}
                ]
            }"#,
        )
        .expect("parses");
        let hits = MilvusIndex::parse_hits(response).expect("valid rows");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record_id, "PRG-001");
        assert_eq!(hits[0].raw_score, 0.12);
        // Absent optional fields default, preserving the record shape.
        assert_eq!(hits[1].payload.category, "");
        assert!(hits[1].payload.eligibility_age_min.is_none());
    }

    #[test]
    fn metric_declares_similarity_pass_through() {
        let index = MilvusIndex::new(ProviderConfig::default()).expect("client builds");
        assert_eq!(index.metric(), SimilarityMetric::CosineSimilarity);
    }

    #[test]
    fn nonzero_code_is_an_error() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"code": 1100, "message": "collection not found", "data": []}"#,
        )
        .expect("parses");
        let err = MilvusIndex::parse_hits(response).unwrap_err();
        assert!(err.to_string().contains("collection not found"));
    }

    #[test]
    fn missing_distance_is_an_error() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"code": 0, "data": [{"id": "PRG-001"}]}"#).expect("parses");
        assert!(MilvusIndex::parse_hits(response).is_err());
    }
}
