//! Per-category behaviour table.
//!
//! Every category binds a validator, a request payload builder, an input
//! summarizer and a fallback synthesizer. The pipeline looks the profile up
//! by category instead of branching on it.

use raed_core::category::Category;
use raed_core::diagnosis::{DiagnosisContent, DiagnosisInput, truncate_preview};
use raed_core::error::{RaedError, Result};
use serde_json::{Value, json};

/// Characters of user input kept in a record's summary.
pub const SUMMARY_CHARS: usize = 100;

/// Characters of writing text sent to the remote service.
pub const WRITING_PAYLOAD_CHARS: usize = 1000;

/// Minimum writing sample length, in characters.
pub const WRITING_MIN_CHARS: usize = 10;

/// Writing samples longer than this are reported as long by the fallback.
const WRITING_LONG_CHARS: usize = 200;

const NO_DETAILS: &str = "No additional details";
const NO_EXAMPLE: &str = "No example provided";
const NO_RESPONSES: &str = "No specific responses";

const FALLBACK_NOTE: &str =
    "Demo result. Check the connection to the analysis service for an accurate diagnosis.";

/// Validation, payload, summary and fallback rules for one category.
///
/// Every function expects an input already passed through
/// [`DiagnosisInput::normalized`].
pub struct CategoryProfile {
    pub category: Category,
    /// Heading of every record in this category
    pub title: &'static str,
    pub validate: fn(&DiagnosisInput) -> Result<()>,
    pub payload: fn(&DiagnosisInput) -> Result<Value>,
    pub summarize: fn(&DiagnosisInput) -> Result<String>,
    pub synthesize_fallback: fn(&DiagnosisInput) -> Result<DiagnosisContent>,
}

static PROFILES: [CategoryProfile; 4] = [
    CategoryProfile {
        category: Category::Time,
        title: "Time Management Diagnosis",
        validate: time::validate,
        payload: time::payload,
        summarize: time::summarize,
        synthesize_fallback: time::fallback,
    },
    CategoryProfile {
        category: Category::Social,
        title: "Communication Analysis",
        validate: social::validate,
        payload: social::payload,
        summarize: social::summarize,
        synthesize_fallback: social::fallback,
    },
    CategoryProfile {
        category: Category::Writing,
        title: "Writing Analysis",
        validate: writing::validate,
        payload: writing::payload,
        summarize: writing::summarize,
        synthesize_fallback: writing::fallback,
    },
    CategoryProfile {
        category: Category::Sales,
        title: "Sales Analysis",
        validate: sales::validate,
        payload: sales::payload,
        summarize: sales::summarize,
        synthesize_fallback: sales::fallback,
    },
];

/// Looks up the profile for `category`.
pub fn profile(category: Category) -> &'static CategoryProfile {
    let index = match category {
        Category::Time => 0,
        Category::Social => 1,
        Category::Writing => 2,
        Category::Sales => 3,
    };
    &PROFILES[index]
}

fn mismatch(expected: Category, input: &DiagnosisInput) -> RaedError {
    RaedError::validation(
        expected,
        format!("expected a {} submission, got {}", expected, input.category()),
    )
}

fn fallback_content(
    category: Category,
    diagnosis: String,
    recommendations: &[&str],
) -> DiagnosisContent {
    DiagnosisContent {
        title: profile(category).title.to_string(),
        diagnosis: Value::String(diagnosis),
        plan: None,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        note: Some(FALLBACK_NOTE.to_string()),
    }
}

/// Canned problem descriptions for the time form's quick buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeExample {
    Procrastination,
    Distraction,
    Exhaustion,
    Priorities,
}

impl std::str::FromStr for TimeExample {
    type Err = RaedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "procrastination" => Ok(Self::Procrastination),
            "distraction" => Ok(Self::Distraction),
            "exhaustion" => Ok(Self::Exhaustion),
            "priorities" => Ok(Self::Priorities),
            other => Err(RaedError::validation(
                Category::Time,
                format!("unknown example '{}'", other),
            )),
        }
    }
}

/// Returns the example problem text for `kind`.
pub fn time_example(kind: TimeExample) -> &'static str {
    match kind {
        TimeExample::Procrastination => {
            "I keep putting important tasks off until the last minute, then work under pressure."
        }
        TimeExample::Distraction => {
            "I start working on one thing, switch to another, and the day ends with nothing finished."
        }
        TimeExample::Exhaustion => {
            "I work long hours but get little done, and I feel exhausted all the time."
        }
        TimeExample::Priorities => {
            "I don't know how to order my priorities; everything feels equally important."
        }
    }
}

mod time {
    use super::*;

    pub fn validate(input: &DiagnosisInput) -> Result<()> {
        match input {
            DiagnosisInput::Time { problem, .. } if problem.is_empty() => Err(
                RaedError::validation(Category::Time, "Please describe your problem first"),
            ),
            DiagnosisInput::Time { .. } => Ok(()),
            other => Err(mismatch(Category::Time, other)),
        }
    }

    pub fn payload(input: &DiagnosisInput) -> Result<Value> {
        let DiagnosisInput::Time { problem, details } = input else {
            return Err(mismatch(Category::Time, input));
        };
        Ok(json!({
            "problem": problem,
            "details": details.as_deref().unwrap_or(NO_DETAILS),
        }))
    }

    pub fn summarize(input: &DiagnosisInput) -> Result<String> {
        let DiagnosisInput::Time { problem, .. } = input else {
            return Err(mismatch(Category::Time, input));
        };
        Ok(truncate_preview(problem, SUMMARY_CHARS))
    }

    pub fn fallback(input: &DiagnosisInput) -> Result<DiagnosisContent> {
        if !matches!(input, DiagnosisInput::Time { .. }) {
            return Err(mismatch(Category::Time, input));
        }
        Ok(fallback_content(
            Category::Time,
            "Based on your description, you seem to struggle with setting priorities and distributing your time.".to_string(),
            &[
                "Pick only three main tasks for each day",
                "Use the Pomodoro technique (25 minutes of work, 5 minutes of rest)",
                "Turn notifications off during focused work",
            ],
        ))
    }
}

mod social {
    use super::*;

    pub fn validate(input: &DiagnosisInput) -> Result<()> {
        match input {
            DiagnosisInput::Social { problem, .. } if problem.is_empty() => Err(
                RaedError::validation(Category::Social, "Please describe your communication problem"),
            ),
            DiagnosisInput::Social { .. } => Ok(()),
            other => Err(mismatch(Category::Social, other)),
        }
    }

    pub fn payload(input: &DiagnosisInput) -> Result<Value> {
        let DiagnosisInput::Social {
            platform,
            problem,
            example,
        } = input
        else {
            return Err(mismatch(Category::Social, input));
        };
        Ok(json!({
            "platform": platform,
            "problem": problem,
            "example": example.as_deref().unwrap_or(NO_EXAMPLE),
        }))
    }

    pub fn summarize(input: &DiagnosisInput) -> Result<String> {
        let DiagnosisInput::Social { problem, .. } = input else {
            return Err(mismatch(Category::Social, input));
        };
        Ok(truncate_preview(problem, SUMMARY_CHARS))
    }

    pub fn fallback(input: &DiagnosisInput) -> Result<DiagnosisContent> {
        let DiagnosisInput::Social { platform, .. } = input else {
            return Err(mismatch(Category::Social, input));
        };
        let platform = if platform.is_empty() {
            "your platform"
        } else {
            platform.as_str()
        };
        Ok(fallback_content(
            Category::Social,
            format!(
                "On {}, your audience responds to value first. Build engagement before asking for it.",
                platform
            ),
            &[
                "Offer value to your audience before asking for engagement",
                "Use striking images and compelling headlines",
                "Reply to commenters and answer their questions",
                "Post during peak hours (6-9 PM)",
            ],
        ))
    }
}

mod writing {
    use super::*;

    pub fn validate(input: &DiagnosisInput) -> Result<()> {
        match input {
            DiagnosisInput::Writing { text, .. } if text.chars().count() < WRITING_MIN_CHARS => {
                Err(RaedError::validation(
                    Category::Writing,
                    format!("Text is too short, write at least {} characters", WRITING_MIN_CHARS),
                ))
            }
            DiagnosisInput::Writing { .. } => Ok(()),
            other => Err(mismatch(Category::Writing, other)),
        }
    }

    pub fn payload(input: &DiagnosisInput) -> Result<Value> {
        let DiagnosisInput::Writing { purpose, text } = input else {
            return Err(mismatch(Category::Writing, input));
        };
        let excerpt: String = text.chars().take(WRITING_PAYLOAD_CHARS).collect();
        Ok(json!({
            "purpose": purpose,
            "text": excerpt,
            "length": text.chars().count(),
        }))
    }

    pub fn summarize(input: &DiagnosisInput) -> Result<String> {
        let DiagnosisInput::Writing { text, .. } = input else {
            return Err(mismatch(Category::Writing, input));
        };
        Ok(truncate_preview(text, SUMMARY_CHARS))
    }

    pub fn fallback(input: &DiagnosisInput) -> Result<DiagnosisContent> {
        let DiagnosisInput::Writing { text, .. } = input else {
            return Err(mismatch(Category::Writing, input));
        };
        let length = text.chars().count();
        let size = if length > WRITING_LONG_CHARS {
            "long"
        } else {
            "short"
        };
        Ok(fallback_content(
            Category::Writing,
            format!(
                "Your text is {} characters long, which is relatively {} on a quick read.",
                length, size
            ),
            &["Split long text into short paragraphs with subheadings"],
        ))
    }
}

mod sales {
    use super::*;

    pub fn validate(input: &DiagnosisInput) -> Result<()> {
        match input {
            DiagnosisInput::Sales {
                scenario, problem, ..
            } if scenario.is_empty() || problem.is_empty() => Err(RaedError::validation(
                Category::Sales,
                "Please describe both the sales scenario and the problem",
            )),
            DiagnosisInput::Sales { .. } => Ok(()),
            other => Err(mismatch(Category::Sales, other)),
        }
    }

    pub fn payload(input: &DiagnosisInput) -> Result<Value> {
        let DiagnosisInput::Sales {
            scenario,
            problem,
            responses,
        } = input
        else {
            return Err(mismatch(Category::Sales, input));
        };
        Ok(json!({
            "scenario": scenario,
            "problem": problem,
            "responses": responses.as_deref().unwrap_or(NO_RESPONSES),
        }))
    }

    pub fn summarize(input: &DiagnosisInput) -> Result<String> {
        let DiagnosisInput::Sales { scenario, .. } = input else {
            return Err(mismatch(Category::Sales, input));
        };
        Ok(truncate_preview(scenario, SUMMARY_CHARS))
    }

    pub fn fallback(input: &DiagnosisInput) -> Result<DiagnosisContent> {
        if !matches!(input, DiagnosisInput::Sales { .. }) {
            return Err(mismatch(Category::Sales, input));
        }
        Ok(fallback_content(
            Category::Sales,
            "Customers buy outcomes. Lead with what the product changes for them.".to_string(),
            &[
                "Focus on the product's benefit, not its specifications",
                "Use success stories from past customers",
                "Anticipate objections and prepare answers in advance",
                "Ask for the sale with confidence and don't fear rejection",
            ],
        ))
    }
}
