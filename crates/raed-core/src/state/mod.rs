//! Persistent session state: the page model and the Store Adapter seam.

pub mod model;
pub mod repository;

pub use model::{DEFAULT_TITLE, Page};
pub use repository::{HISTORY_KEY, KeyValueStore, LAST_PAGE_KEY};
