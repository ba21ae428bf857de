//! Interaction layer for Raed: clients for the remote analysis service.

pub mod http_diagnosis_service;

pub use http_diagnosis_service::HttpDiagnosisService;
