//! Transaction generator launcher CLI
//!
//! Splits a target TPS across `trx_generator` processes, runs them all
//! concurrently and exits with the first failing generator's exit code.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{cmd_launch, LaunchArgs};
use tracing::Level;

#[derive(Parser)]
#[command(name = "launch-trx-generators", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    launch: LaunchArgs,

    /// Enable verbose logging and echo generator command lines
    #[arg(short, long)]
    verbose: bool,

    /// Print help
    #[arg(short = '?', action = ArgAction::Help)]
    question_help: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the plan/status output
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = cmd_launch(cli.launch, cli.verbose).await?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
