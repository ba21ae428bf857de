use async_trait::async_trait;
use raed_application::{DiagnosisSession, HISTORY_CAPACITY};
use raed_core::category::{Category, Provenance, Severity};
use raed_core::config::RaedConfig;
use raed_core::diagnosis::{
    DiagnosisInput, DiagnosisRequest, DiagnosisResponse, DiagnosisService, ProbeResponse,
};
use raed_core::error::{RaedError, Result};
use raed_core::state::Page;
use raed_infrastructure::{JsonFileStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A service that is never reachable.
struct OfflineService;

#[async_trait]
impl DiagnosisService for OfflineService {
    async fn diagnose(&self, _request: &DiagnosisRequest) -> Result<DiagnosisResponse> {
        Err(RaedError::transport("network unreachable"))
    }

    async fn probe(&self) -> Result<ProbeResponse> {
        Err(RaedError::transport("network unreachable"))
    }
}

fn procrastination() -> DiagnosisInput {
    DiagnosisInput::Time {
        problem: "procrastination issue".to_string(),
        details: None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_offline_time_diagnosis_falls_back_and_moves_to_results() {
    let config = RaedConfig::default();
    let session = DiagnosisSession::new(
        Arc::new(MemoryStore::new()),
        Arc::new(OfflineService),
        &config,
    );
    session.startup().await;
    session.navigate("time").await;

    let submission = session.submit(&procrastination()).await.unwrap();

    let record = &submission.outcome.record;
    assert_eq!(record.category, Category::Time);
    assert_eq!(record.provenance, Provenance::Fallback);
    assert_eq!(record.severity, Some(Severity::Medium));
    assert_eq!(session.history().len().await, 1);

    // Still on the form until the delay elapses
    assert_eq!(session.navigator().current().await, Page::Time);
    let scheduled = submission.auto_navigation.unwrap();
    assert_eq!(scheduled.target(), Page::Results);

    tokio::time::sleep(config.auto_navigation_delay() - Duration::from_millis(1)).await;
    assert_eq!(session.navigator().current().await, Page::Time);

    scheduled.wait().await.unwrap();
    assert_eq!(session.navigator().current().await, Page::Results);
}

#[tokio::test(start_paused = true)]
async fn test_caller_can_cancel_auto_navigation() {
    let session = DiagnosisSession::new(
        Arc::new(MemoryStore::new()),
        Arc::new(OfflineService),
        &RaedConfig::default(),
    );
    session.navigate("time").await;

    let submission = session.submit(&procrastination()).await.unwrap();
    let scheduled = submission.auto_navigation.unwrap();
    scheduled.cancel();

    assert!(scheduled.wait().await.is_none());
    assert_eq!(session.navigator().current().await, Page::Time);
}

#[tokio::test]
async fn test_state_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let config = RaedConfig::default();

    let first_id = {
        let session = DiagnosisSession::new(
            Arc::new(JsonFileStore::new(dir.path())),
            Arc::new(OfflineService),
            &config,
        );
        session.startup().await;
        session.navigate("sales").await;
        let submission = session
            .submit(&DiagnosisInput::Sales {
                scenario: "enterprise renewal".to_string(),
                problem: "budget freeze".to_string(),
                responses: Some("we offered a discount".to_string()),
            })
            .await
            .unwrap();
        submission.outcome.record.id
    };

    let session = DiagnosisSession::new(
        Arc::new(JsonFileStore::new(dir.path())),
        Arc::new(OfflineService),
        &config,
    );
    let report = session.startup().await;

    assert_eq!(report.page, Page::Sales);
    assert_eq!(report.history_len, 1);
    let restored = session.history().find_by_id(first_id).await.unwrap();
    assert!(restored.is_fallback());
    assert_eq!(restored.input_summary, "enterprise renewal");
}

#[tokio::test]
async fn test_history_stays_bounded_across_categories() {
    let session = DiagnosisSession::new(
        Arc::new(MemoryStore::new()),
        Arc::new(OfflineService),
        &RaedConfig::default(),
    );

    for i in 0..60 {
        let input = DiagnosisInput::Social {
            platform: "linkedin".to_string(),
            problem: format!("post {} got no reach", i),
            example: None,
        };
        session.submit(&input).await.unwrap();
    }

    let records = session.history().records().await;
    assert_eq!(records.len(), HISTORY_CAPACITY);
    assert_eq!(records[0].input_summary, "post 59 got no reach");
    assert!(records.windows(2).all(|pair| pair[0].id > pair[1].id));

    let stats = session.history().stats().await;
    assert_eq!(stats.count(Category::Social), HISTORY_CAPACITY);
    assert_eq!(stats.fallback_count, HISTORY_CAPACITY);
}

#[tokio::test]
async fn test_submit_without_startup_keeps_earlier_history() {
    let dir = TempDir::new().unwrap();
    let config = RaedConfig::default();
    let open_session = || {
        DiagnosisSession::new(
            Arc::new(JsonFileStore::new(dir.path())),
            Arc::new(OfflineService),
            &config,
        )
    };

    let earlier = open_session();
    for problem in ["late every day", "too many meetings", "no focus"] {
        earlier
            .submit(&DiagnosisInput::Time {
                problem: problem.to_string(),
                details: None,
            })
            .await
            .unwrap();
    }

    // No startup() before submitting
    let later = open_session();
    later.submit(&procrastination()).await.unwrap();

    let reopened = open_session();
    let report = reopened.startup().await;
    assert_eq!(report.history_len, 4);
    let summaries: Vec<_> = reopened
        .history()
        .records()
        .await
        .into_iter()
        .map(|r| r.input_summary)
        .collect();
    assert_eq!(
        summaries,
        vec!["procrastination issue", "no focus", "too many meetings", "late every day"]
    );
}
