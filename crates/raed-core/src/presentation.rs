//! Declarative outputs for the presentation layer.
//!
//! The core never draws anything. It returns these intents and the UI
//! (terminal, web view, ...) decides how to carry them out.

use serde::{Deserialize, Serialize};

use crate::state::Page;

/// How a notice should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }
}

/// Something the presentation layer should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresentationIntent {
    /// Redraw the history list
    RenderRecordList,
    /// Show one record
    RenderResult { record_id: u64 },
    /// Flash a notice
    ShowNotice(Notice),
    /// Set the window/document title
    UpdateTitle { page: Page, title: String },
    /// Scroll the viewport back to the top
    ScrollToTop,
}

impl PresentationIntent {
    pub fn notice(notice: Notice) -> Self {
        Self::ShowNotice(notice)
    }

    /// Returns the notice carried by this intent, if any.
    pub fn as_notice(&self) -> Option<&Notice> {
        match self {
            Self::ShowNotice(notice) => Some(notice),
            _ => None,
        }
    }
}
