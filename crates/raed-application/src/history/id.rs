use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out time-based record ids that never repeat.
///
/// An id is the current wall-clock time in milliseconds, bumped past the
/// last id issued or observed, so two records created in the same
/// millisecond (or after the clock steps backwards) still differ.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id based on the current time.
    pub fn next(&self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    /// Returns a fresh id no smaller than `now_millis`.
    pub fn next_at(&self, now_millis: u64) -> u64 {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_millis.max(current.saturating_add(1));
            match self.last.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Records an id that exists in storage so it is never handed out again.
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}
