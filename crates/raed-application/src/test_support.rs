//! Fakes shared by the unit tests of this crate.

use async_trait::async_trait;
use chrono::Local;
use raed_core::category::{Category, Provenance};
use raed_core::diagnosis::{
    DiagnosisContent, DiagnosisRecord, DiagnosisRequest, DiagnosisResponse, DiagnosisService,
    ProbeResponse,
};
use raed_core::error::{RaedError, Result};
use raed_core::state::KeyValueStore;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory store whose reads and writes can be made to fail.
#[derive(Default)]
pub struct MockStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RaedError::persistence("read refused"));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RaedError::persistence("disk full"));
        }
        self.put(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// What the mock service answers to `diagnose`.
#[derive(Clone)]
pub enum Reply {
    Respond(DiagnosisResponse),
    Fail(RaedError),
    /// Sleep before answering with the inner reply
    Delay(Duration, Box<Reply>),
}

/// Scripted [`DiagnosisService`] that records the requests it receives.
pub struct MockService {
    reply: Reply,
    probe: Result<ProbeResponse>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<DiagnosisRequest>>,
}

impl MockService {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            probe: Ok(ProbeResponse {
                success: true,
                message: Some("ok".into()),
                error: None,
            }),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(diagnosis: serde_json::Value) -> Self {
        Self::new(Reply::Respond(DiagnosisResponse {
            success: true,
            diagnosis: Some(diagnosis),
            ..Default::default()
        }))
    }

    pub fn unreachable() -> Self {
        Self::new(Reply::Fail(RaedError::transport("connection refused")))
    }

    pub fn with_probe(mut self, probe: Result<ProbeResponse>) -> Self {
        self.probe = probe;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<DiagnosisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DiagnosisService for MockService {
    async fn diagnose(&self, request: &DiagnosisRequest) -> Result<DiagnosisResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let mut reply = self.reply.clone();
        loop {
            match reply {
                Reply::Respond(response) => return Ok(response),
                Reply::Fail(err) => return Err(err),
                Reply::Delay(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }

    async fn probe(&self) -> Result<ProbeResponse> {
        self.probe.clone()
    }
}

/// A minimal remote record for history tests.
pub fn record(id: u64, category: Category) -> DiagnosisRecord {
    DiagnosisRecord {
        id,
        category,
        input_summary: format!("input {}", id),
        diagnosis_content: DiagnosisContent {
            title: "Test".to_string(),
            diagnosis: json!(format!("diagnosis {}", id)),
            plan: None,
            recommendations: Vec::new(),
            note: None,
        },
        provenance: Provenance::Remote,
        severity: None,
        created_at: Local::now(),
    }
}
