//! Closed vocabularies shared by records, requests and pages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Diagnosis category.
///
/// Each category has its own validator, request payload and fallback
/// synthesizer; see the category profile table in `raed-application`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Time management
    Time,
    /// Social media communication
    Social,
    /// Writing quality
    Writing,
    /// Sales conversations
    Sales,
}

/// Severity of a diagnosis. Only the `time` category carries one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// Where a record's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provenance {
    /// Produced by the remote analysis service
    Remote,
    /// Synthesized locally because the remote call failed
    Fallback,
}
