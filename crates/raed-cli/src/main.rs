use anyhow::Result;
use clap::{Parser, Subcommand};
use raed_application::TimeExample;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "raed")]
#[command(about = "Raed - smart diagnosis for your time, communication, writing and sales", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/raed/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep history and page state in memory only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a problem
    Diagnose {
        #[command(subcommand)]
        category: DiagnoseCommand,
    },
    /// List past diagnoses, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show one diagnosis
    Show { id: u64 },
    /// Summarize the history
    Stats,
    /// Switch to a page (home, time, social, writing, sales, results)
    Page { id: String },
    /// Delete every stored diagnosis
    Clear,
    /// Check the connection to the analysis service
    Probe,
    /// Show an example diagnosis, then open the time form
    Demo,
}

#[derive(Subcommand)]
pub enum DiagnoseCommand {
    /// Time management
    Time {
        /// What goes wrong with your time
        problem: Option<String>,
        #[arg(long)]
        details: Option<String>,
        /// Use a canned problem: procrastination, distraction, exhaustion, priorities
        #[arg(long, conflicts_with = "problem")]
        example: Option<TimeExample>,
        /// Stay on the time page instead of moving to results
        #[arg(long)]
        stay: bool,
    },
    /// Social media communication
    Social {
        #[arg(long)]
        platform: String,
        problem: String,
        /// A post or message that shows the problem
        #[arg(long)]
        example: Option<String>,
    },
    /// Writing quality
    Writing {
        #[arg(long, default_value = "general")]
        purpose: String,
        text: String,
    },
    /// Sales conversations
    Sales {
        #[arg(long)]
        scenario: String,
        problem: String,
        /// What you said to the customer
        #[arg(long)]
        responses: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = AppContext::build(cli.config.as_deref(), cli.offline)?;

    match cli.command {
        Commands::Diagnose { category } => commands::diagnose::run(&ctx, category).await?,
        Commands::History { limit } => commands::history::list(&ctx, limit).await,
        Commands::Show { id } => commands::history::show(&ctx, id).await?,
        Commands::Stats => commands::history::stats(&ctx).await,
        Commands::Page { id } => commands::page::activate(&ctx, &id).await?,
        Commands::Clear => commands::history::clear(&ctx).await,
        Commands::Probe => commands::page::probe(&ctx).await,
        Commands::Demo => commands::page::demo(&ctx).await,
    }

    Ok(())
}
