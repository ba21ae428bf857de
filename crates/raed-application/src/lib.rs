//! Application layer for Raed.
//!
//! Wires the domain types to a store and a remote service: the bounded
//! history cache, one request pipeline per category, the page navigator and
//! the session bootstrap that ties them together.

pub mod bootstrap;
pub mod demo;
pub mod history;
pub mod navigator;
pub mod pipeline;
pub mod profiles;

#[cfg(test)]
mod test_support;

pub use bootstrap::{DiagnosisSession, ProbeStatus, StartupReport, Submission, notice_for_error};
pub use demo::{DEMO_DIAGNOSIS, DemoDiagnosis};
pub use history::{HISTORY_CAPACITY, HistoryCache, HistoryStats};
pub use navigator::{ScheduledNavigation, SessionNavigator};
pub use pipeline::{DiagnosisOutcome, DiagnosisPipeline, PipelineOptions};
pub use profiles::{TimeExample, time_example};
