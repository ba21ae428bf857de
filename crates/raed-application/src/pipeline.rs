//! Diagnosis request pipeline.

use chrono::{Local, Utc};
use raed_core::category::{Category, Provenance, Severity};
use raed_core::config::{RaedConfig, SubmissionPolicy};
use raed_core::diagnosis::{
    DiagnosisContent, DiagnosisInput, DiagnosisRecord, DiagnosisRequest, DiagnosisService,
    RemoteDiagnosis,
};
use raed_core::error::{RaedError, Result};
use raed_core::presentation::{Notice, PresentationIntent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

use crate::history::HistoryCache;
use crate::profiles::{CategoryProfile, profile};

const SUCCESS_NOTICE: &str = "Diagnosis complete!";
const DEGRADED_NOTICE: &str = "Showing a demo result (limited connection to the analysis service)";

/// Knobs for one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    /// Upper bound on the remote call; `None` leaves it to the transport
    pub timeout: Option<Duration>,
    pub policy: SubmissionPolicy,
}

impl PipelineOptions {
    pub fn from_config(config: &RaedConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            policy: config.submission_policy,
        }
    }
}

/// Result of a pipeline run over valid input.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOutcome {
    /// The record appended to history
    pub record: DiagnosisRecord,
    /// The remote failure that forced fallback synthesis, if any
    pub degraded: Option<RaedError>,
    pub intents: Vec<PresentationIntent>,
}

impl DiagnosisOutcome {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Whether the session should move on to the results page after the
    /// auto-navigation delay.
    pub fn wants_results_page(&self) -> bool {
        self.record.category == Category::Time
    }
}

/// Turns a user submission for one category into a history record.
///
/// For valid input `run` always yields a record: the remote result when the
/// service answers successfully, a locally synthesized one otherwise. The
/// remote call is attempted exactly once.
pub struct DiagnosisPipeline {
    profile: &'static CategoryProfile,
    history: Arc<HistoryCache>,
    service: Arc<dyn DiagnosisService>,
    options: PipelineOptions,
    in_flight: Mutex<()>,
}

impl DiagnosisPipeline {
    pub fn new(
        category: Category,
        history: Arc<HistoryCache>,
        service: Arc<dyn DiagnosisService>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            profile: profile(category),
            history,
            service,
            options,
            in_flight: Mutex::new(()),
        }
    }

    pub fn category(&self) -> Category {
        self.profile.category
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Validates `input`, asks the remote service, falls back on failure and
    /// appends the record to history.
    ///
    /// # Errors
    ///
    /// - `Validation` when the input breaks the category rules. Nothing is
    ///   sent and nothing is stored.
    /// - `SubmissionInFlight` under [`SubmissionPolicy::Ignore`] while an
    ///   earlier run of this pipeline has not finished.
    pub async fn run(&self, input: &DiagnosisInput) -> Result<DiagnosisOutcome> {
        let category = self.category();
        let input = input.normalized();
        if let Err(e) = (self.profile.validate)(&input) {
            tracing::debug!(target: "pipeline", %category, "Rejected input: {}", e);
            return Err(e);
        }

        let _permit = self.acquire().await?;

        let request = DiagnosisRequest {
            category,
            payload: (self.profile.payload)(&input)?,
            submitted_at: Utc::now(),
        };
        let input_summary = (self.profile.summarize)(&input)?;

        let (content, provenance, severity, degraded) = match self.call_remote(&request).await {
            Ok(remote) => {
                tracing::info!(target: "pipeline", %category, "Remote diagnosis received");
                let (content, severity) = self.remote_content(remote);
                (content, Provenance::Remote, severity, None)
            }
            Err(e) => {
                tracing::warn!(target: "pipeline", %category, "Remote diagnosis failed, using fallback: {}", e);
                let content = (self.profile.synthesize_fallback)(&input)?;
                let severity = (category == Category::Time).then_some(Severity::Medium);
                (content, Provenance::Fallback, severity, Some(e))
            }
        };

        let record = DiagnosisRecord {
            id: self.history.next_id().await,
            category,
            input_summary,
            diagnosis_content: content,
            provenance,
            severity,
            created_at: Local::now(),
        };
        self.history.append(record.clone()).await?;

        let notice = if degraded.is_some() {
            Notice::warning(DEGRADED_NOTICE)
        } else {
            Notice::success(SUCCESS_NOTICE)
        };
        let intents = vec![
            PresentationIntent::RenderResult {
                record_id: record.id,
            },
            PresentationIntent::RenderRecordList,
            PresentationIntent::notice(notice),
        ];

        Ok(DiagnosisOutcome {
            record,
            degraded,
            intents,
        })
    }

    async fn acquire(&self) -> Result<Option<MutexGuard<'_, ()>>> {
        match self.options.policy {
            SubmissionPolicy::Allow => Ok(None),
            SubmissionPolicy::Queue => Ok(Some(self.in_flight.lock().await)),
            SubmissionPolicy::Ignore => match self.in_flight.try_lock() {
                Ok(guard) => Ok(Some(guard)),
                Err(_) => {
                    tracing::debug!(target: "pipeline", category = %self.category(), "Ignoring submission while one is in flight");
                    Err(RaedError::SubmissionInFlight {
                        category: self.category(),
                    })
                }
            },
        }
    }

    /// One attempt, bounded by the configured timeout. Any failure, whatever
    /// its kind, ends in fallback.
    async fn call_remote(&self, request: &DiagnosisRequest) -> Result<RemoteDiagnosis> {
        let call = self.service.diagnose(request);
        let response = match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                RaedError::transport(format!("no response within {} ms", limit.as_millis()))
            })??,
            None => call.await?,
        };
        response.into_result()
    }

    fn remote_content(&self, remote: RemoteDiagnosis) -> (DiagnosisContent, Option<Severity>) {
        let is_time = self.category() == Category::Time;
        let content = DiagnosisContent {
            title: self.profile.title.to_string(),
            diagnosis: remote.diagnosis,
            plan: if is_time { remote.plan } else { None },
            recommendations: Vec::new(),
            note: None,
        };
        let severity = is_time.then(|| remote.severity.unwrap_or_default());
        (content, severity)
    }
}
