//! Plain-text rendering of presentation intents.

use raed_application::DiagnosisSession;
use raed_core::diagnosis::DiagnosisRecord;
use raed_core::presentation::{Notice, NoticeLevel, PresentationIntent};
use serde_json::Value;

pub async fn intents(session: &DiagnosisSession, intents: &[PresentationIntent]) {
    for intent in intents {
        match intent {
            PresentationIntent::UpdateTitle { title, .. } => println!("== {} ==", title),
            PresentationIntent::ScrollToTop => {}
            PresentationIntent::ShowNotice(n) => notice(n),
            PresentationIntent::RenderResult { record_id } => {
                if let Some(r) = session.history().find_by_id(*record_id).await {
                    record(&r);
                }
            }
            PresentationIntent::RenderRecordList => {
                println!("History: {} diagnoses", session.history().len().await);
            }
        }
    }
}

pub fn notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Info => "info",
    };
    println!("[{}] {}", tag, notice.message);
}

pub fn record(record: &DiagnosisRecord) {
    let content = &record.diagnosis_content;
    println!();
    println!("{}", content.title);
    print!("  #{}  {}  {}", record.id, record.category, record.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(severity) = record.severity {
        print!("  severity: {}", severity);
    }
    if record.is_fallback() {
        print!("  (demo result)");
    }
    println!();
    println!("  Input: {}", record.input_summary);
    println!();
    println!("{}", text(&content.diagnosis));
    if let Some(plan) = &content.plan {
        println!();
        println!("Plan:");
        println!("{}", text(plan));
    }
    for (i, tip) in content.recommendations.iter().enumerate() {
        if i == 0 {
            println!();
        }
        println!("  {}. {}", i + 1, tip);
    }
    if let Some(note) = &content.note {
        println!();
        println!("  {}", note);
    }
}

pub fn summary_line(record: &DiagnosisRecord) -> String {
    format!(
        "{:>14}  {}  {:<8} {:<8}  {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.category.to_string(),
        record.provenance.to_string(),
        record.input_summary
    )
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
