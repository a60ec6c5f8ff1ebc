//! gptcommit - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;

use gptcommit::app::{
    Context, InteractiveOutcome, InteractiveRequest, TerminalPrompter, init_tracing,
    run_interactive,
};
use gptcommit::config::Config;
use gptcommit::git::locate_repository;
use gptcommit::llm::Language;

/// Generate a conventional commit message for the staged changes using DeepSeek.
#[derive(Parser, Debug)]
#[command(name = "gptcommit")]
#[command(about = "AI-powered git commit message generator")]
#[command(version)]
struct Cli {
    /// Commit with this message instead of generating one
    message: Option<String>,

    /// Language for the generated commit message
    #[arg(short = 'l', long = "lang", value_enum, default_value_t = Language::Zh)]
    lang: Language,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    locate_repository(&cwd)?;

    let ctx = Context::new(Config::from_env(), cwd);
    let request = InteractiveRequest {
        message: cli.message,
        language: cli.lang,
    };

    let outcome = run_interactive(
        &ctx.git,
        &ctx.credentials,
        |key| ctx.chat_client(key),
        &mut TerminalPrompter,
        request,
    )
    .await?;

    match outcome {
        InteractiveOutcome::Committed(_) => {
            println!("✓ Committed");
            Ok(ExitCode::SUCCESS)
        }
        InteractiveOutcome::Declined => {
            println!("Commit cancelled");
            Ok(ExitCode::SUCCESS)
        }
        InteractiveOutcome::NothingToCommit => {
            eprintln!("No staged changes to commit");
            Ok(ExitCode::FAILURE)
        }
    }
}
