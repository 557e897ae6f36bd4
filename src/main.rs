use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crashfinder::{ConfigStore, ConsolePrompter, ModelInvoker, Pipeline, ResultView};

#[derive(Parser, Debug)]
#[command(name = "crashfinder")]
#[command(version = "0.1.0")]
#[command(about = "Find which changes between two commits likely caused a production issue")]
struct Args {
    /// Repository to analyze (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// How many recent commits to offer in the pick list
    #[arg(long, default_value = "20")]
    limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick two commits, describe the issue, and get an AI analysis
    Analyze,
    /// Enter and save provider credentials
    Configure,
    /// Remove the stored provider configuration
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("crashfinder=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let store = ConfigStore::new()?;
    let mut pipeline = Pipeline::new(
        args.repo,
        store,
        ConsolePrompter::stdio(),
        ResultView::new(std::io::stdout()),
        ModelInvoker::openai(),
    )
    .with_commit_limit(args.limit);

    let result = match args.command {
        Command::Analyze => pipeline.analyze().await,
        Command::Configure => pipeline.configure().map(|_| {
            println!("Provider configuration saved.");
        }),
        Command::Clear => pipeline.clear().map(|_| {
            println!("Provider configuration cleared.");
        }),
    };

    // Every error surfaces as a single user-visible message.
    if let Err(e) = result {
        if e.is_user_abort() {
            eprintln!("{e}");
            return Ok(());
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
