//! gptcommit - conventional commit messages from the staged diff.
//!
//! # Overview
//!
//! gptcommit reads `git diff --cached`, asks the DeepSeek chat completion API
//! for a Conventional Commits message, and either commits it after
//! confirmation (`gptcommit`) or writes it into git's message file from a
//! `prepare-commit-msg` hook.

pub mod app;
pub mod config;
pub mod credential;
pub mod error;
pub mod git;
pub mod hook;
pub mod llm;

// Re-export commonly used types
pub use config::{ApiConfig, Config};
pub use credential::{ApiKey, CredentialResolver, CredentialSource, KeyCache};
pub use error::{CacheError, CredentialError, GitError, HookError, LlmError};
pub use git::GitBridge;
pub use hook::{HookManager, HookState};
pub use llm::{ChatClient, Language, MessageGenerator};
