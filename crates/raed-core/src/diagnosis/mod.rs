//! Diagnosis domain module.
//!
//! This module contains the diagnosis record model, the user-submitted input
//! types, the wire types exchanged with the remote analysis service, and the
//! service trait itself.
//!
//! # Module Structure
//!
//! - `model`: History unit (`DiagnosisRecord`, `DiagnosisContent`)
//! - `input`: Category-specific user input (`DiagnosisInput`)
//! - `wire`: Remote request/response shapes (`DiagnosisRequest`, `DiagnosisResponse`, `ProbeResponse`)
//! - `service`: Remote-call seam (`DiagnosisService`)
//!
//! # Usage
//!
//! ```ignore
//! use raed_core::diagnosis::{DiagnosisRecord, DiagnosisInput, DiagnosisService};
//! ```

mod input;
mod model;
mod service;
mod wire;

// Re-export public API
pub use input::{DiagnosisInput, truncate_preview};
pub use model::{DiagnosisContent, DiagnosisRecord};
pub use service::DiagnosisService;
pub use wire::{DiagnosisRequest, DiagnosisResponse, ProbeResponse, RemoteDiagnosis};
