//! Error types for gptcommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from API key resolution.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "DeepSeek API key not found.\n\n\
             Set it up with one of:\n  \
             1. OS keychain:  service 'deepseek-key', account 'gptcommit'\n     \
                macOS: security add-generic-password -s deepseek-key -a gptcommit -w 'your-api-key'\n     \
                (macOS entries for 'deepseek-key' under any account are also found)\n  \
             2. Environment:  export DEEPSEEK_API_KEY='your-api-key'\n  \
             3. Git config:   git config gptcommit.apikey 'your-api-key'"
    )]
    Missing,
}

/// Errors from the API key cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cache record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write cache file: {0}")]
    Write(#[source] std::io::Error),
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository. Run gptcommit from within a git repository.")]
    NotARepository(#[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from enabling or disabling the prepare-commit-msg hook.
#[derive(Error, Debug)]
pub enum HookError {
    #[error(
        "Hook template not found at {0}.\n\n\
             Install the template script there first, then re-run enable."
    )]
    TemplateMissing(PathBuf),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the chat completion API.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("API response contained no message content")]
    EmptyResponse,
}
