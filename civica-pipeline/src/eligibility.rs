//! Eligibility assessment: compares a program record's age bounds and
//! region list against the user's profile. Feeds per-candidate hints into
//! the synthesis prompt; it is not a routing action.

use civica_core::models::{ProgramRecord, UserContext};

/// Outcome of checking one record against one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityAssessment {
    pub eligible: bool,
    pub matched_criteria: Vec<&'static str>,
    pub failed_criteria: Vec<&'static str>,
    pub explanation: String,
}

/// Assess a record against the user profile. Returns `None` when the
/// profile carries nothing the record constrains on — no hint is better
/// than a vacuous one.
pub fn assess(record: &ProgramRecord, user: &UserContext) -> Option<EligibilityAssessment> {
    let mut matched = Vec::new();
    let mut failed = Vec::new();
    let mut notes = Vec::new();

    if let Some(age) = user.age {
        match (record.eligibility_age_min, record.eligibility_age_max) {
            (None, None) => {}
            (min, max) => {
                let min = min.unwrap_or(0);
                let max = max.unwrap_or(u32::MAX);
                if (min..=max).contains(&age) {
                    matched.push("age");
                    notes.push(format!("age {age} is within the eligible range"));
                } else {
                    failed.push("age");
                    notes.push(format!(
                        "age {age} is outside the eligible range ({})",
                        format_age_range(record)
                    ));
                }
            }
        }
    }

    if let Some(region) = &user.region {
        if !record.eligibility_regions.is_empty() {
            let hit = record
                .eligibility_regions
                .iter()
                .any(|r| r.eq_ignore_ascii_case(region));
            if hit {
                matched.push("region");
                notes.push(format!("available in {region}"));
            } else {
                failed.push("region");
                notes.push(format!("not offered in {region}"));
            }
        }
    }

    if matched.is_empty() && failed.is_empty() {
        return None;
    }

    Some(EligibilityAssessment {
        eligible: failed.is_empty(),
        matched_criteria: matched,
        failed_criteria: failed,
        explanation: notes.join("; "),
    })
}

fn format_age_range(record: &ProgramRecord) -> String {
    match (record.eligibility_age_min, record.eligibility_age_max) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        (Some(min), None) => format!("{min}+"),
        (None, Some(max)) => format!("up to {max}"),
        (None, None) => "unrestricted".to_string(),
    }
}
