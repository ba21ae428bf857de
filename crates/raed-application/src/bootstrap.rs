//! Session wiring and startup.

use raed_core::category::Category;
use raed_core::config::RaedConfig;
use raed_core::diagnosis::{DiagnosisInput, DiagnosisService};
use raed_core::error::{RaedError, Result};
use raed_core::presentation::{Notice, PresentationIntent};
use raed_core::state::{KeyValueStore, Page};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;

use crate::history::HistoryCache;
use crate::navigator::{ScheduledNavigation, SessionNavigator};
use crate::pipeline::{DiagnosisOutcome, DiagnosisPipeline, PipelineOptions};

const WELCOME_NOTICE: &str = "Welcome! Start with your first diagnosis";
const PROBE_NOTICE: &str = "Server connection limited, using the local version";
const UNKNOWN_PAGE_NOTICE: &str = "Page not found";

/// Outcome of the startup connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The service answered and reported success
    Connected { message: Option<String> },
    /// The service answered but reported failure
    Limited { error: Option<String> },
    /// The service could not be reached
    Unreachable(RaedError),
}

impl ProbeStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// What happened during [`DiagnosisSession::startup`].
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub page: Page,
    pub history_len: usize,
    pub probe: ProbeStatus,
    pub intents: Vec<PresentationIntent>,
}

/// A finished submission.
#[derive(Debug)]
pub struct Submission {
    pub outcome: DiagnosisOutcome,
    /// Pending switch to the results page, present after a time diagnosis
    pub auto_navigation: Option<ScheduledNavigation>,
}

/// One user session: history, one pipeline per category, and navigation,
/// all sharing a single store.
pub struct DiagnosisSession {
    history: Arc<HistoryCache>,
    navigator: Arc<SessionNavigator>,
    pipelines: BTreeMap<Category, DiagnosisPipeline>,
    service: Arc<dyn DiagnosisService>,
    auto_navigation_delay: Duration,
}

impl DiagnosisSession {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        service: Arc<dyn DiagnosisService>,
        config: &RaedConfig,
    ) -> Self {
        let history = Arc::new(HistoryCache::new(store.clone()));
        let navigator = Arc::new(SessionNavigator::new(store));
        let options = PipelineOptions::from_config(config);
        let pipelines = Category::iter()
            .map(|category| {
                let pipeline =
                    DiagnosisPipeline::new(category, history.clone(), service.clone(), options);
                (category, pipeline)
            })
            .collect();

        Self {
            history,
            navigator,
            pipelines,
            service,
            auto_navigation_delay: config.auto_navigation_delay(),
        }
    }

    /// Restores the last page, loads history and probes the remote service.
    ///
    /// Nothing here can fail: unreadable state falls back to defaults and
    /// the probe only decides whether a notice is shown.
    pub async fn startup(&self) -> StartupReport {
        tracing::info!(target: "bootstrap", "Starting diagnosis session");

        let mut intents = self.restore().await;
        let history_len = self.history.len().await;

        let probe = self.probe().await;
        if matches!(probe, ProbeStatus::Unreachable(_)) {
            intents.push(PresentationIntent::notice(Notice::warning(PROBE_NOTICE)));
        }

        StartupReport {
            page: self.navigator.current().await,
            history_len,
            probe,
            intents,
        }
    }

    /// Restores the last page and loads history without touching the
    /// network.
    pub async fn restore(&self) -> Vec<PresentationIntent> {
        let mut intents = self.navigator.restore_last_page().await;
        let history_len = self.history.load().await.len();
        intents.push(PresentationIntent::RenderRecordList);
        if history_len == 0 {
            intents.push(PresentationIntent::notice(Notice::info(WELCOME_NOTICE)));
        }
        intents
    }

    /// Runs the connectivity probe once. Its result gates nothing.
    pub async fn probe(&self) -> ProbeStatus {
        match self.service.probe().await {
            Ok(response) if response.success => {
                tracing::info!(target: "bootstrap", "Analysis service reachable: {}", response.message.as_deref().unwrap_or("ok"));
                ProbeStatus::Connected {
                    message: response.message,
                }
            }
            Ok(response) => {
                tracing::warn!(target: "bootstrap", "Analysis service limited: {}", response.error.as_deref().unwrap_or("no details"));
                ProbeStatus::Limited {
                    error: response.error,
                }
            }
            Err(e) => {
                tracing::warn!(target: "bootstrap", "Analysis service unreachable: {}", e);
                ProbeStatus::Unreachable(e)
            }
        }
    }

    /// Runs the pipeline for the input's category. A time diagnosis also
    /// schedules the switch to the results page.
    pub async fn submit(&self, input: &DiagnosisInput) -> Result<Submission> {
        let outcome = self.pipeline(input.category())?.run(input).await?;
        let auto_navigation = outcome
            .wants_results_page()
            .then(|| {
                self.navigator
                    .schedule(Page::Results, self.auto_navigation_delay)
            });
        Ok(Submission {
            outcome,
            auto_navigation,
        })
    }

    /// Activates a page by id, turning an unknown id into an error notice.
    pub async fn navigate(&self, page_id: &str) -> Vec<PresentationIntent> {
        match self.navigator.activate(page_id).await {
            Ok(intents) => intents,
            Err(e) => vec![PresentationIntent::notice(notice_for_error(&e))],
        }
    }

    /// Empties the history.
    pub async fn clear_history(&self) -> Vec<PresentationIntent> {
        self.history.clear().await;
        tracing::info!(target: "bootstrap", "History cleared");
        vec![
            PresentationIntent::RenderRecordList,
            PresentationIntent::notice(Notice::info("History cleared")),
        ]
    }

    pub fn pipeline(&self, category: Category) -> Result<&DiagnosisPipeline> {
        self.pipelines
            .get(&category)
            .ok_or_else(|| RaedError::internal(format!("no pipeline for {}", category)))
    }

    pub fn history(&self) -> &Arc<HistoryCache> {
        &self.history
    }

    pub fn navigator(&self) -> &Arc<SessionNavigator> {
        &self.navigator
    }

    pub fn auto_navigation_delay(&self) -> Duration {
        self.auto_navigation_delay
    }
}

/// The notice to show when an operation fails.
pub fn notice_for_error(err: &RaedError) -> Notice {
    match err {
        RaedError::Validation { message, .. } => Notice::error(message.clone()),
        RaedError::Navigation { .. } => Notice::error(UNKNOWN_PAGE_NOTICE),
        RaedError::SubmissionInFlight { .. } => Notice::info(err.to_string()),
        other => Notice::error(other.to_string()),
    }
}
