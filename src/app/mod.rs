//! Invocation flows shared by the `gptcommit` and `prepare-commit-msg` binaries.

pub mod hook;
pub mod interactive;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::credential::{ApiKey, CredentialResolver, KeyCache};
use crate::error::LlmError;
use crate::git::GitBridge;
use crate::hook::HookManager;
use crate::llm::ChatClient;

pub use hook::{HookCommand, HookEnv, HookOutcome, run_hook};
pub use interactive::{
    InteractiveOutcome, InteractiveRequest, Prompter, TerminalPrompter, run_interactive,
};

/// Components for one invocation, wired from a [`Config`].
pub struct Context {
    pub config: Config,
    pub git: GitBridge,
    pub credentials: CredentialResolver,
}

impl Context {
    pub fn new(config: Config, workdir: impl Into<PathBuf>) -> Self {
        let git = GitBridge::new(workdir);
        let credentials = CredentialResolver::with_default_sources(git.clone());
        Self {
            config,
            git,
            credentials,
        }
    }

    pub fn key_cache(&self) -> KeyCache {
        KeyCache::new(self.config.cache_path(), self.config.cache_ttl)
    }

    pub fn hook_manager(&self) -> HookManager {
        HookManager::new(self.git.clone(), self.config.hook_template_path())
    }

    /// Build the production chat client for a resolved key.
    pub fn chat_client(&self, key: ApiKey) -> Result<ChatClient, LlmError> {
        ChatClient::new(&self.config.api, key)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
