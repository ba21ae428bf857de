use raed_core::category::{Category, Provenance};
use raed_core::diagnosis::DiagnosisRecord;
use raed_core::error::{RaedError, Result};
use raed_core::state::{HISTORY_KEY, KeyValueStore};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::{Mutex, MutexGuard};

use super::id::RecordIdGenerator;

/// Maximum number of records kept in history.
pub const HISTORY_CAPACITY: usize = 50;

/// Aggregate counts over the current history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    /// Every category is present, zero when unused
    pub by_category: BTreeMap<Category, usize>,
    pub fallback_count: usize,
    /// Rough estimate shown on the results page: five minutes per time diagnosis
    pub estimated_minutes_saved: usize,
    /// Rough estimate shown on the results page: two per diagnosis
    pub strengths_found: usize,
}

impl HistoryStats {
    fn from_records(records: &[DiagnosisRecord]) -> Self {
        let mut by_category: BTreeMap<Category, usize> =
            Category::iter().map(|category| (category, 0)).collect();
        let mut fallback_count = 0;

        for record in records {
            *by_category.entry(record.category).or_insert(0) += 1;
            if record.provenance == Provenance::Fallback {
                fallback_count += 1;
            }
        }

        let time_count = by_category.get(&Category::Time).copied().unwrap_or(0);
        Self {
            total: records.len(),
            by_category,
            fallback_count,
            estimated_minutes_saved: time_count * 5,
            strengths_found: records.len() * 2,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

struct HistoryState {
    /// Newest first, never longer than `HISTORY_CAPACITY`
    records: Vec<DiagnosisRecord>,
    /// The last write to the store failed, so the store is behind memory
    unsynced: bool,
    /// The store has been read at least once
    loaded: bool,
}

/// Bounded, newest-first history of diagnosis records mirrored to a
/// [`KeyValueStore`].
///
/// The cache is the only writer of [`HISTORY_KEY`]. All mutations go through
/// one async mutex, so concurrent `append` calls never interleave their
/// read-modify-write. The store is read before the first operation that
/// needs it, so a write never replaces history this cache has not seen.
/// Store failures are logged and leave the in-memory sequence intact for the
/// rest of the session.
pub struct HistoryCache {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<HistoryState>,
    ids: RecordIdGenerator,
}

impl HistoryCache {
    /// Creates a cache over `store`. The store is read lazily.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: Mutex::new(HistoryState {
                records: Vec::new(),
                unsynced: false,
                loaded: false,
            }),
            ids: RecordIdGenerator::new(),
        }
    }

    /// Creates a cache and loads the persisted history into it.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let cache = Self::new(store);
        cache.load().await;
        cache
    }

    /// Reads the persisted history into memory and returns it.
    ///
    /// A missing key, unreadable store or malformed JSON yields an empty
    /// history. If an earlier write failed, memory is newer than the store:
    /// the write is retried and the in-memory sequence is kept.
    pub async fn load(&self) -> Vec<DiagnosisRecord> {
        let mut state = self.state.lock().await;

        if state.unsynced {
            tracing::warn!(target: "history", "Store is behind memory, keeping in-memory history");
            self.persist(&mut state);
            return state.records.clone();
        }

        self.reload(&mut state);
        state.records.clone()
    }

    /// Locks the state, reading the store first if it never has been.
    async fn loaded_state(&self) -> MutexGuard<'_, HistoryState> {
        let mut state = self.state.lock().await;
        if !state.loaded {
            self.reload(&mut state);
        }
        state
    }

    fn reload(&self, state: &mut HistoryState) {
        let records = self.read_store();
        for record in &records {
            self.ids.observe(record.id);
        }
        state.records = records;
        state.loaded = true;
    }

    fn read_store(&self) -> Vec<DiagnosisRecord> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(target: "history", "Failed to read history: {}", e);
                return Vec::new();
            }
        };

        let parsed: Vec<DiagnosisRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(target: "history", "Discarding malformed history: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut records: Vec<DiagnosisRecord> = parsed
            .into_iter()
            .filter(|record| seen.insert(record.id))
            .collect();
        records.truncate(HISTORY_CAPACITY);
        records
    }

    /// Inserts `record` at the head, evicts everything past
    /// `HISTORY_CAPACITY`, persists, and returns the resulting history.
    ///
    /// Appending a record that is already present (same id, same content) is
    /// a no-op, so replays are harmless. A *different* record with an id
    /// already in use is rejected with `DuplicateRecord`.
    ///
    /// Persistence failures are logged, not returned.
    pub async fn append(&self, record: DiagnosisRecord) -> Result<Vec<DiagnosisRecord>> {
        let mut state = self.loaded_state().await;

        if let Some(existing) = state.records.iter().find(|r| r.id == record.id) {
            if *existing == record {
                tracing::debug!(target: "history", id = record.id, "Replayed append ignored");
                return Ok(state.records.clone());
            }
            return Err(RaedError::DuplicateRecord { id: record.id });
        }

        self.ids.observe(record.id);
        state.records.insert(0, record);
        if state.records.len() > HISTORY_CAPACITY {
            let evicted = state.records.len() - HISTORY_CAPACITY;
            state.records.truncate(HISTORY_CAPACITY);
            tracing::debug!(target: "history", evicted, "Evicted oldest records");
        }

        self.persist(&mut state);
        Ok(state.records.clone())
    }

    /// Removes every record and persists the empty history.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.records.clear();
        state.loaded = true;
        self.persist(&mut state);
    }

    /// Looks a record up by id.
    pub async fn find_by_id(&self, id: u64) -> Option<DiagnosisRecord> {
        let state = self.loaded_state().await;
        state.records.iter().find(|r| r.id == id).cloned()
    }

    /// Snapshot of the history, newest first.
    pub async fn records(&self) -> Vec<DiagnosisRecord> {
        self.loaded_state().await.records.clone()
    }

    pub async fn len(&self) -> usize {
        self.loaded_state().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.loaded_state().await.records.is_empty()
    }

    /// Counts recomputed from the current history on every call.
    pub async fn stats(&self) -> HistoryStats {
        let state = self.loaded_state().await;
        HistoryStats::from_records(&state.records)
    }

    /// Returns an id not used by any stored or cached record.
    pub async fn next_id(&self) -> u64 {
        let _state = self.loaded_state().await;
        self.ids.next()
    }

    fn persist(&self, state: &mut HistoryState) {
        let json = match serde_json::to_string(&state.records) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(target: "history", "Failed to serialize history: {}", e);
                state.unsynced = true;
                return;
            }
        };

        match self.store.set(HISTORY_KEY, &json) {
            Ok(()) => state.unsynced = false,
            Err(e) => {
                tracing::warn!(target: "history", "Failed to persist history: {}", e);
                state.unsynced = true;
            }
        }
    }
}
