//! Remote analysis service trait.

use async_trait::async_trait;

use super::wire::{DiagnosisRequest, DiagnosisResponse, ProbeResponse};
use crate::error::Result;

/// An abstract client for the remote analysis service.
///
/// This trait decouples the request pipeline from the transport
/// (HTTP today, anything that answers the same shapes tomorrow).
///
/// # Implementation Notes
///
/// Implementations should:
/// - Make exactly one attempt per call (no retries)
/// - Map connect/timeout/body-decoding failures to `RaedError::Transport`
/// - Map non-2xx statuses to `RaedError::Service`
/// - Return the parsed body as-is, leaving `success: false` handling to the caller
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    /// Sends one diagnosis request.
    async fn diagnose(&self, request: &DiagnosisRequest) -> Result<DiagnosisResponse>;

    /// Performs the parameterless connectivity check.
    async fn probe(&self) -> Result<ProbeResponse>;
}
