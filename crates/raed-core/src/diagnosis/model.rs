//! Diagnosis record domain model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{Category, Provenance, Severity};

/// Rendered result of a diagnosis.
///
/// The remote service decides the shape of `diagnosis` and `plan`, so both
/// are kept as opaque JSON. Fallback synthesis fills `diagnosis` with a
/// string and lists its advice in `recommendations`.
///
/// `plan` is never `Some(Value::Null)`: a JSON `null` would come back as
/// `None` after a storage round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisContent {
    /// Heading shown above the result
    pub title: String,
    /// The diagnosis body
    pub diagnosis: Value,
    /// Optional action plan (time category)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    /// Short actionable tips
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// Footnote shown under the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One persisted result of analyzing a user-submitted problem.
///
/// Records are created once, at the end of a pipeline run, and never mutated.
/// They leave the history only through capacity eviction or an explicit clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    /// Time-based identifier, unique for the lifetime of the store
    pub id: u64,
    pub category: Category,
    /// Truncated preview of what the user submitted
    pub input_summary: String,
    pub diagnosis_content: DiagnosisContent,
    pub provenance: Provenance,
    /// Only set for the `time` category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub created_at: DateTime<Local>,
}

impl DiagnosisRecord {
    /// Returns true when the content was synthesized locally.
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record(provenance: Provenance) -> DiagnosisRecord {
        DiagnosisRecord {
            id: 1_760_000_000_123,
            category: Category::Time,
            input_summary: "procrastination issue".to_string(),
            diagnosis_content: DiagnosisContent {
                title: "Time Management Diagnosis".to_string(),
                diagnosis: json!({ "summary": "priorities unclear", "score": 42 }),
                plan: Some(json!(["plan the day", "block focus time"])),
                recommendations: vec!["Pick three tasks".to_string()],
                note: None,
            },
            provenance,
            severity: Some(Severity::High),
            created_at: Local::now(),
        }
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = sample_record(Provenance::Remote);
        let json = serde_json::to_string(&record).unwrap();
        let restored: DiagnosisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_remote_floats_survive_storage() {
        let mut record = sample_record(Provenance::Remote);
        record.diagnosis_content.diagnosis = json!({
            "weights": [1.0715660391465826e-75, -1.81996730402717e-179, -1.603964615428183e+143],
        });
        record.diagnosis_content.plan = Some(json!({ "ratio": 0.1 + 0.2 }));

        let json = serde_json::to_string(&record).unwrap();
        let restored: DiagnosisRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, record);
    }

    #[test]
    fn test_provenance_survives_storage() {
        let record = sample_record(Provenance::Fallback);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["provenance"], "fallback");
        assert_eq!(json["inputSummary"], "procrastination issue");

        let restored: DiagnosisRecord = serde_json::from_value(json).unwrap();
        assert!(restored.is_fallback());
    }

    #[test]
    fn test_severity_omitted_when_absent() {
        let mut record = sample_record(Provenance::Remote);
        record.category = Category::Sales;
        record.severity = None;
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("severity").is_none());
    }
}
