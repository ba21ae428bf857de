//! Wire types exchanged with the remote analysis service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{Category, Severity};
use crate::error::{RaedError, Result};

/// Request body for a single diagnosis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub category: Category,
    /// Category-specific fields
    pub payload: Value,
    /// Serialized as RFC 3339 / ISO-8601
    pub submitted_at: DateTime<Utc>,
}

/// Response body of a diagnosis call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub success: bool,
    #[serde(default)]
    pub diagnosis: Option<Value>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub plan: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The usable part of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDiagnosis {
    pub diagnosis: Value,
    pub severity: Option<Severity>,
    pub plan: Option<Value>,
}

impl DiagnosisResponse {
    /// Checks the response against the success contract.
    ///
    /// `success: false` becomes a `Service` error carrying the reported
    /// message. A successful response without a diagnosis is malformed and
    /// also rejected. JSON `null` values count as absent.
    pub fn into_result(self) -> Result<RemoteDiagnosis> {
        if !self.success {
            return Err(RaedError::service(
                self.error
                    .unwrap_or_else(|| "diagnosis failed".to_string()),
            ));
        }

        let diagnosis = self
            .diagnosis
            .filter(|value| !value.is_null())
            .ok_or_else(|| RaedError::service("response reported success without a diagnosis"))?;

        Ok(RemoteDiagnosis {
            diagnosis,
            severity: self.severity,
            plan: self.plan.filter(|value| !value.is_null()),
        })
    }
}

/// Response body of the startup connectivity probe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
