use anyhow::{Result, bail};

use super::context::AppContext;
use super::render;

pub async fn list(ctx: &AppContext, limit: usize) {
    let session = &ctx.session;
    let records = session.history().load().await;
    if records.is_empty() {
        println!("No diagnoses yet. Try `raed diagnose time \"...\"`.");
        return;
    }
    for record in records.iter().take(limit) {
        println!("{}", render::summary_line(record));
    }
    if records.len() > limit {
        println!("... {} more", records.len() - limit);
    }
}

pub async fn show(ctx: &AppContext, id: u64) -> Result<()> {
    let history = ctx.session.history();
    history.load().await;
    match history.find_by_id(id).await {
        Some(record) => {
            render::record(&record);
            Ok(())
        }
        None => bail!("No diagnosis with id {}", id),
    }
}

pub async fn stats(ctx: &AppContext) {
    let history = ctx.session.history();
    history.load().await;
    let stats = history.stats().await;

    println!("Diagnoses:          {}", stats.total);
    for (category, count) in &stats.by_category {
        println!("  {:<17} {}", category.to_string(), count);
    }
    println!("Demo results:       {}", stats.fallback_count);
    println!("Minutes saved:      {}", stats.estimated_minutes_saved);
    println!("Strengths found:    {}", stats.strengths_found);
}

pub async fn clear(ctx: &AppContext) {
    let session = &ctx.session;
    session.history().load().await;
    let intents = session.clear_history().await;
    render::intents(session, &intents).await;
}
