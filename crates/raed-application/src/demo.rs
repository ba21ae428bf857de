//! The canned example diagnosis shown before a first real one.

use raed_core::category::Category;
use raed_core::presentation::PresentationIntent;
use raed_core::state::Page;

use crate::navigator::SessionNavigator;

/// A worked example of what a time diagnosis looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoDiagnosis {
    pub category: Category,
    pub problem: &'static str,
    pub finding: &'static str,
    /// Risk estimate, in percent
    pub risk: u8,
    pub cause: &'static str,
    pub remedy: &'static str,
}

pub const DEMO_DIAGNOSIS: DemoDiagnosis = DemoDiagnosis {
    category: Category::Time,
    problem: "I work 10 hours a day but get nothing done",
    finding: "chronic procrastination",
    risk: 75,
    cause: "You focus on easy tasks and keep postponing the hard ones.",
    remedy: "Start the day with the hardest task and use the Pomodoro technique.",
};

impl DemoDiagnosis {
    /// The page the "try it yourself" action leads to.
    pub fn try_page(&self) -> Page {
        Page::for_category(self.category)
    }

    /// Leaves the demo for the form of its category.
    pub async fn try_it_yourself(&self, navigator: &SessionNavigator) -> Vec<PresentationIntent> {
        navigator.activate_page(self.try_page()).await
    }
}
