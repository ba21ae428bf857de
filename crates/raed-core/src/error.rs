//! Error types for the Raed diagnosis assistant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// A shared error type for the entire Raed workspace.
///
/// None of these errors is fatal to the process. Validation and navigation
/// errors are surfaced to the user, transport and service errors are absorbed
/// by fallback synthesis, and persistence errors are logged and swallowed by
/// the components that own the affected key.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaedError {
    /// User input failed the category rules
    #[error("Validation failed for {category}: {message}")]
    Validation { category: Category, message: String },

    /// The remote call could not be completed (connect, timeout, bad body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered but reported failure
    #[error("Service error: {0}")]
    Service(String),

    /// A page id outside the closed page set
    #[error("Unknown page: '{page}'")]
    Navigation { page: String },

    /// Store Adapter read/write failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A different record already owns this id
    #[error("Record id {id} is already used by a different record")]
    DuplicateRecord { id: u64 },

    /// A submission for this category is already running
    #[error("A {category} diagnosis is already in progress")]
    SubmissionInFlight { category: Category },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RaedError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(category: Category, message: impl Into<String>) -> Self {
        Self::Validation {
            category,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Creates a Navigation error
    pub fn navigation(page: impl Into<String>) -> Self {
        Self::Navigation { page: page.into() }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a navigation error
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if the remote side failed, either in transit or by reporting
    /// `success: false`.
    ///
    /// These are the errors the request pipeline recovers from with a
    /// fallback record.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Service(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RaedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RaedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RaedError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RaedError>`.
pub type Result<T> = std::result::Result<T, RaedError>;
