//! Bounded diagnosis history.

mod cache;
mod id;

pub use cache::{HISTORY_CAPACITY, HistoryCache, HistoryStats};
pub use id::RecordIdGenerator;
