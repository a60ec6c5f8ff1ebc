//! Staged diff, config and commit operations via the system `git` binary.
//!
//! Shelling out inherits the user's git config, hooks and signing setup, which
//! `git commit` needs to behave exactly as it would from the terminal.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::GitError;

/// Runs git subprocesses in a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitBridge {
    workdir: PathBuf,
}

impl GitBridge {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Text of `git diff --cached`. Empty when nothing is staged.
    pub fn staged_diff(&self) -> Result<String, GitError> {
        let output = self.run_checked(&["diff", "--cached"], "diff --cached")?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Value of `git config --get <key>`, or `None` when unset or empty.
    pub fn config_get(&self, key: &str) -> Option<String> {
        let output = self.run(&["config", "--get", key], "config --get").ok()?;

        if !output.status.success() {
            debug!("git config --get {} exited with {:?}", key, output.status.code());
            return None;
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Set a repository-scoped config value.
    pub fn config_set(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.run_checked(&["config", key, value], "config")?;
        Ok(())
    }

    /// Create a commit with the given message.
    ///
    /// A failure here may have left a partial commit attempt behind, so it is
    /// reported to the caller and never retried.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_checked(&["commit", "-m", message], "commit")?;
        Ok(())
    }

    fn run(&self, args: &[&str], operation: &str) -> Result<Output, GitError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })
    }

    fn run_checked(&self, args: &[&str], operation: &str) -> Result<Output, GitError> {
        let output = self.run(args, operation)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output)
    }
}
