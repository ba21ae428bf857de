//! Session page state domain model.
//!
//! The active page is the only piece of navigation state that survives a
//! restart.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::category::Category;

/// Fallback document title for anything without a dedicated one.
pub const DEFAULT_TITLE: &str = "Raed - Smart Diagnosis";

/// The closed set of pages the navigator can activate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Time,
    Social,
    Writing,
    Sales,
    Results,
}

impl Page {
    /// Parses a page id, returning `None` for anything outside the closed set.
    pub fn parse(page_id: &str) -> Option<Self> {
        page_id.parse().ok()
    }

    /// Document title for this page.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Raed - Home",
            Page::Time => "Raed - Time Diagnosis",
            Page::Social => "Raed - Social Diagnosis",
            Page::Writing => "Raed - Writing Diagnosis",
            Page::Sales => "Raed - Sales Diagnosis",
            Page::Results => "Raed - Results",
        }
    }

    /// The workflow page for a diagnosis category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Time => Page::Time,
            Category::Social => Page::Social,
            Category::Writing => Page::Writing,
            Category::Sales => Page::Sales,
        }
    }

    /// Returns the category whose workflow this page hosts, if any.
    pub fn category(self) -> Option<Category> {
        match self {
            Page::Time => Some(Category::Time),
            Page::Social => Some(Category::Social),
            Page::Writing => Some(Category::Writing),
            Page::Sales => Some(Category::Sales),
            Page::Home | Page::Results => None,
        }
    }
}
