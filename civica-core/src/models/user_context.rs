use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Profile attributes supplied by the caller for personalization and
/// query expansion. Read-only to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContext {
    pub age: Option<u32>,
    pub region: Option<String>,
    pub employment_status: Option<String>,
    pub education: Option<String>,
    /// Attributes outside the known profile schema, passed through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UserContext {
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.region.is_none()
            && self.employment_status.is_none()
            && self.education.is_none()
            && self.extra.is_empty()
    }

    /// Compact one-line summary for prompt construction,
    /// e.g. `age: 25, region: Seoul, employment: student`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(age) = self.age {
            parts.push(format!("age: {age}"));
        }
        if let Some(region) = &self.region {
            parts.push(format!("region: {region}"));
        }
        if let Some(status) = &self.employment_status {
            parts.push(format!("employment: {status}"));
        }
        if let Some(education) = &self.education {
            parts.push(format!("education: {education}"));
        }
        for (key, value) in &self.extra {
            if let Some(s) = value.as_str() {
                parts.push(format!("{key}: {s}"));
            }
        }
        if parts.is_empty() {
            "no profile on file".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserContext {
        UserContext {
            age: Some(25),
            region: Some("Seoul".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn summary_includes_known_fields() {
        let summary = sample().summary();
        assert!(summary.contains("age: 25"));
        assert!(summary.contains("region: Seoul"));
    }

    #[test]
    fn empty_context_has_placeholder_summary() {
        let ctx = UserContext::default();
        assert!(ctx.is_empty());
        assert_eq!(ctx.summary(), "no profile on file");
    }

    #[test]
    fn unknown_attributes_flatten_through_serde() {
        let ctx: UserContext =
            serde_json::from_str(r#"{"age": 30, "household_size": "3"}"#).expect("parse");
        assert_eq!(ctx.age, Some(30));
        assert!(ctx.extra.contains_key("household_size"));
    }
}
