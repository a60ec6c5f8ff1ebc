//! `prepare-commit-msg` hook flow.
//!
//! A disabled hook or an empty index is a silent no-op: the hook must never get
//! in the way of a normal commit.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use crate::config::ENABLED_GIT_CONFIG;
use crate::credential::{ApiKey, CredentialResolver, KeyCache};
use crate::error::LlmError;
use crate::git::GitBridge;
use crate::hook::HookManager;
use crate::llm::{Language, MessageGenerator};

/// What git (or the user) asked the hook binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCommand {
    Enable,
    Disable,
    /// Write a generated message into the file git passed us.
    Prepare { message_file: PathBuf },
}

impl HookCommand {
    /// `enable` and `disable` are commands; anything else is the message file.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "enable" => HookCommand::Enable,
            "disable" => HookCommand::Disable,
            path => HookCommand::Prepare {
                message_file: PathBuf::from(path),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Enabled(PathBuf),
    Disabled,
    /// `gptcommit.enabled` is not `true`.
    Inactive,
    /// Nothing is staged.
    NothingStaged,
    Written(PathBuf),
}

/// Everything the hook flow touches.
pub struct HookEnv<'a> {
    pub git: &'a GitBridge,
    pub credentials: &'a CredentialResolver,
    pub cache: &'a KeyCache,
    pub manager: &'a HookManager,
}

/// Run one hook invocation.
pub async fn run_hook<G, F>(
    env: HookEnv<'_>,
    command: HookCommand,
    language: Language,
    make_generator: F,
) -> Result<HookOutcome>
where
    G: MessageGenerator,
    F: FnOnce(ApiKey) -> Result<G, LlmError>,
{
    match command {
        HookCommand::Enable => {
            let path = env.manager.enable().context("Failed to enable hook")?;
            Ok(HookOutcome::Enabled(path))
        }
        HookCommand::Disable => {
            env.manager.disable().context("Failed to disable hook")?;
            Ok(HookOutcome::Disabled)
        }
        HookCommand::Prepare { message_file } => {
            prepare_message(&env, message_file, language, make_generator).await
        }
    }
}

async fn prepare_message<G, F>(
    env: &HookEnv<'_>,
    message_file: PathBuf,
    language: Language,
    make_generator: F,
) -> Result<HookOutcome>
where
    G: MessageGenerator,
    F: FnOnce(ApiKey) -> Result<G, LlmError>,
{
    if env.git.config_get(ENABLED_GIT_CONFIG).as_deref() != Some("true") {
        debug!("{} is not true, leaving message untouched", ENABLED_GIT_CONFIG);
        return Ok(HookOutcome::Inactive);
    }

    let diff = env
        .git
        .staged_diff()
        .context("Failed to read staged changes")?;
    if diff.is_empty() {
        return Ok(HookOutcome::NothingStaged);
    }

    let key = env.credentials.resolve()?;
    if let Err(e) = env.cache.put(&key) {
        warn!("Could not cache API key: {}", e);
    }

    let generator = make_generator(key)?;
    let message = generator
        .generate(&diff, language)
        .await
        .context("Failed to generate commit message")?;

    fs::write(&message_file, &message)
        .with_context(|| format!("Failed to write {}", message_file.display()))?;

    Ok(HookOutcome::Written(message_file))
}
