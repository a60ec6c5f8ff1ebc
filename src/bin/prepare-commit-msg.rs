//! prepare-commit-msg - git hook entry point.
//!
//! Invoked by git as `prepare-commit-msg <file> [source] [sha]`, or by the user
//! as `prepare-commit-msg enable|disable`.

use anyhow::{Context as _, Result};
use clap::Parser;

use gptcommit::app::{Context, HookCommand, HookEnv, HookOutcome, init_tracing, run_hook};
use gptcommit::config::Config;
use gptcommit::llm::Language;

/// Write an AI-generated commit message into git's message file.
#[derive(Parser, Debug)]
#[command(name = "prepare-commit-msg")]
#[command(about = "git prepare-commit-msg hook for gptcommit")]
#[command(version)]
struct Cli {
    /// Path of the commit message file, or `enable` / `disable`
    target: String,

    /// Source of the commit message (passed by git, unused)
    source: Option<String>,

    /// Commit object name (passed by git, unused)
    sha: Option<String>,

    /// Language for the generated commit message
    #[arg(short = 'l', long = "lang", value_enum, default_value_t = Language::Zh)]
    lang: Language,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let ctx = Context::new(Config::from_env(), cwd);
    let cache = ctx.key_cache();
    let manager = ctx.hook_manager();

    let env = HookEnv {
        git: &ctx.git,
        credentials: &ctx.credentials,
        cache: &cache,
        manager: &manager,
    };

    let outcome = run_hook(
        env,
        HookCommand::from_arg(&cli.target),
        cli.lang,
        |key| ctx.chat_client(key),
    )
    .await?;

    match outcome {
        HookOutcome::Enabled(path) => println!("✓ gptcommit hook enabled ({})", path.display()),
        HookOutcome::Disabled => println!("✓ gptcommit hook disabled"),
        HookOutcome::Inactive | HookOutcome::NothingStaged | HookOutcome::Written(_) => {}
    }

    Ok(())
}
