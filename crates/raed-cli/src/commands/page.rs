use anyhow::{Result, bail};
use raed_application::{DEMO_DIAGNOSIS, ProbeStatus, notice_for_error};
use raed_core::state::DEFAULT_TITLE;

use super::context::AppContext;
use super::render;

pub async fn activate(ctx: &AppContext, page_id: &str) -> Result<()> {
    let session = &ctx.session;
    session.restore().await;
    let before = session.navigator().current().await;

    match session.navigator().activate(page_id).await {
        Ok(intents) => {
            render::intents(session, &intents).await;
            Ok(())
        }
        Err(e) => {
            render::notice(&notice_for_error(&e));
            bail!("Unknown page '{}', still on {}", page_id, before)
        }
    }
}

pub async fn probe(ctx: &AppContext) {
    println!("Endpoint: {}", ctx.config.endpoint);
    match ctx.session.probe().await {
        ProbeStatus::Connected { message } => {
            println!("[ok] Connected: {}", message.as_deref().unwrap_or("ok"));
        }
        ProbeStatus::Limited { error } => {
            println!("[warning] Limited: {}", error.as_deref().unwrap_or("no details"));
        }
        ProbeStatus::Unreachable(e) => {
            println!("[warning] Unreachable, using the local version: {}", e);
        }
    }
}

/// Prints the example diagnosis and moves to the form it demonstrates.
pub async fn demo(ctx: &AppContext) {
    let session = &ctx.session;
    session.restore().await;

    let demo = DEMO_DIAGNOSIS;
    println!("== {} ==", DEFAULT_TITLE);
    println!("Example diagnosis");
    println!();
    println!("  Problem: \"{}\"", demo.problem);
    println!("  Diagnosis: {} ({}% risk)", demo.finding, demo.risk);
    println!("  Cause: {}", demo.cause);
    println!("  Remedy: {}", demo.remedy);
    println!();
    println!("Try it yourself: raed diagnose {} \"<your problem>\"", demo.category);
    println!();

    let intents = demo.try_it_yourself(session.navigator()).await;
    render::intents(session, &intents).await;
}
