use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder endpoint used until the user configures a real one.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/raed-diagnosis/exec";

/// What a pipeline does with a submission while another one for the same
/// category is still in flight.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPolicy {
    /// Reject the second submission
    #[default]
    Ignore,
    /// Wait for the in-flight run, then start
    Queue,
    /// Run both concurrently
    Allow,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RaedConfig {
    /// Remote analysis service URL
    pub endpoint: String,
    /// Per-request timeout; `None` leaves it to the transport
    pub request_timeout_ms: Option<u64>,
    pub probe_timeout_ms: u64,
    /// Delay before a finished time diagnosis switches to the results page
    pub auto_navigation_delay_ms: u64,
    pub submission_policy: SubmissionPolicy,
    /// Directory for the Store Adapter; `None` uses the platform data dir
    pub data_dir: Option<PathBuf>,
}

impl Default for RaedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: None,
            probe_timeout_ms: 5_000,
            auto_navigation_delay_ms: 3_000,
            submission_policy: SubmissionPolicy::default(),
            data_dir: None,
        }
    }
}

impl RaedConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn auto_navigation_delay(&self) -> Duration {
        Duration::from_millis(self.auto_navigation_delay_ms)
    }
}
