//! Domain layer for Raed.
//!
//! Holds the types every other crate speaks: categories, pages, diagnosis
//! records and their wire shapes, presentation intents, configuration, the
//! shared error type, and the two seams (`KeyValueStore`, `DiagnosisService`)
//! that infrastructure and interaction crates implement.

pub mod category;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod presentation;
pub mod state;

// Re-export common types
pub use category::{Category, Provenance, Severity};
pub use config::{RaedConfig, SubmissionPolicy};
pub use diagnosis::{DiagnosisContent, DiagnosisInput, DiagnosisRecord, DiagnosisService};
pub use error::{RaedError, Result};
pub use presentation::{Notice, NoticeLevel, PresentationIntent};
pub use state::{KeyValueStore, Page};
