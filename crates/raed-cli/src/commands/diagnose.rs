use anyhow::Result;
use raed_application::{notice_for_error, time_example};
use raed_core::diagnosis::DiagnosisInput;
use raed_core::state::Page;

use super::context::AppContext;
use super::render;
use crate::DiagnoseCommand;

pub async fn run(ctx: &AppContext, command: DiagnoseCommand) -> Result<()> {
    let session = &ctx.session;
    let (input, stay) = to_input(command);

    let report = session.startup().await;
    render::intents(session, &report.intents).await;
    let page = Page::for_category(input.category());
    render::intents(session, &session.navigator().activate_page(page).await).await;

    let submission = match session.submit(&input).await {
        Ok(submission) => submission,
        Err(e) => {
            render::notice(&notice_for_error(&e));
            return Err(e.into());
        }
    };
    render::intents(session, &submission.outcome.intents).await;

    if let Some(scheduled) = submission.auto_navigation {
        if stay {
            scheduled.cancel();
        } else {
            println!();
            println!(
                "Opening results in {} s...",
                session.auto_navigation_delay().as_secs()
            );
        }
        if let Some(intents) = scheduled.wait().await {
            render::intents(session, &intents).await;
        }
    }

    Ok(())
}

fn to_input(command: DiagnoseCommand) -> (DiagnosisInput, bool) {
    match command {
        DiagnoseCommand::Time {
            problem,
            details,
            example,
            stay,
        } => {
            let problem = match example {
                Some(kind) => time_example(kind).to_string(),
                None => problem.unwrap_or_default(),
            };
            (DiagnosisInput::Time { problem, details }, stay)
        }
        DiagnoseCommand::Social {
            platform,
            problem,
            example,
        } => (
            DiagnosisInput::Social {
                platform,
                problem,
                example,
            },
            false,
        ),
        DiagnoseCommand::Writing { purpose, text } => {
            (DiagnosisInput::Writing { purpose, text }, false)
        }
        DiagnoseCommand::Sales {
            scenario,
            problem,
            responses,
        } => (
            DiagnosisInput::Sales {
                scenario,
                problem,
                responses,
            },
            false,
        ),
    }
}
