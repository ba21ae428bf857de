//! Infrastructure layer for Raed: Store Adapter implementations, path
//! resolution and configuration loading.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigLoader;
pub use crate::paths::RaedPaths;
pub use crate::storage::{JsonFileStore, MemoryStore};
