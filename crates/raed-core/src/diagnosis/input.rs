//! User-submitted diagnosis input.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// What the user typed into one of the four diagnosis forms.
///
/// The variant determines the category, so a time input can never be handed
/// to the writing pipeline's validator by accident without being caught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum DiagnosisInput {
    Time {
        problem: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Social {
        platform: String,
        problem: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    Writing {
        purpose: String,
        text: String,
    },
    Sales {
        scenario: String,
        problem: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        responses: Option<String>,
    },
}

impl DiagnosisInput {
    /// Returns the category this input belongs to.
    pub fn category(&self) -> Category {
        match self {
            Self::Time { .. } => Category::Time,
            Self::Social { .. } => Category::Social,
            Self::Writing { .. } => Category::Writing,
            Self::Sales { .. } => Category::Sales,
        }
    }

    /// Returns a copy with every field trimmed and blank optional fields
    /// collapsed to `None`.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Time { problem, details } => Self::Time {
                problem: problem.trim().to_string(),
                details: trim_optional(details),
            },
            Self::Social {
                platform,
                problem,
                example,
            } => Self::Social {
                platform: platform.trim().to_string(),
                problem: problem.trim().to_string(),
                example: trim_optional(example),
            },
            Self::Writing { purpose, text } => Self::Writing {
                purpose: purpose.trim().to_string(),
                text: text.trim().to_string(),
            },
            Self::Sales {
                scenario,
                problem,
                responses,
            } => Self::Sales {
                scenario: scenario.trim().to_string(),
                problem: problem.trim().to_string(),
                responses: trim_optional(responses),
            },
        }
    }
}

fn trim_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Cuts `text` to at most `max_chars` characters, appending `...` when
/// something was cut.
///
/// Counts characters, not bytes, so multi-byte scripts are never split.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
