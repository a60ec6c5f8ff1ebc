//! Enabling and disabling the prepare-commit-msg hook in a repository.
//!
//! The hook is "enabled" when `gptcommit.enabled` is `true` and the template
//! script has been copied to `<git-dir>/hooks/prepare-commit-msg`. The
//! template itself is installed separately and is never created here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ENABLED_GIT_CONFIG;
use crate::error::HookError;
use crate::git::{GitBridge, locate_repository};

/// File name git looks for in the hooks directory.
pub const HOOK_NAME: &str = "prepare-commit-msg";

/// Observed on-disk hook state of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookState {
    pub enabled: bool,
    pub installed: bool,
}

/// Toggles the hook for the repository containing the bridge's workdir.
pub struct HookManager {
    git: GitBridge,
    template: PathBuf,
}

impl HookManager {
    pub fn new(git: GitBridge, template: impl Into<PathBuf>) -> Self {
        Self {
            git,
            template: template.into(),
        }
    }

    /// Turn the hook on and (re)install the script. Safe to re-run.
    pub fn enable(&self) -> Result<PathBuf, HookError> {
        let hooks_dir = self.hooks_dir()?;

        self.git.config_set(ENABLED_GIT_CONFIG, "true")?;

        fs::create_dir_all(&hooks_dir).map_err(|source| HookError::Io {
            action: "create",
            path: hooks_dir.clone(),
            source,
        })?;

        if !self.template.is_file() {
            return Err(HookError::TemplateMissing(self.template.clone()));
        }

        let hook_path = hooks_dir.join(HOOK_NAME);
        fs::copy(&self.template, &hook_path).map_err(|source| HookError::Io {
            action: "copy hook to",
            path: hook_path.clone(),
            source,
        })?;
        make_executable(&hook_path)?;

        debug!("Installed hook at {}", hook_path.display());
        Ok(hook_path)
    }

    /// Turn the hook off and remove the script if present.
    pub fn disable(&self) -> Result<(), HookError> {
        let hooks_dir = self.hooks_dir()?;

        self.git.config_set(ENABLED_GIT_CONFIG, "false")?;

        let hook_path = hooks_dir.join(HOOK_NAME);
        if hook_path.exists() {
            fs::remove_file(&hook_path).map_err(|source| HookError::Io {
                action: "remove",
                path: hook_path.clone(),
                source,
            })?;
            debug!("Removed hook at {}", hook_path.display());
        }

        Ok(())
    }

    pub fn state(&self) -> Result<HookState, HookError> {
        let hooks_dir = self.hooks_dir()?;
        let enabled = self.git.config_get(ENABLED_GIT_CONFIG).as_deref() == Some("true");
        let installed = hooks_dir.join(HOOK_NAME).is_file();
        Ok(HookState { enabled, installed })
    }

    fn hooks_dir(&self) -> Result<PathBuf, HookError> {
        Ok(locate_repository(self.git.workdir())?.hooks_dir())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), HookError> {
    use std::os::unix::fs::PermissionsExt;

    let io_err = |source| HookError::Io {
        action: "set permissions on",
        path: path.to_path_buf(),
        source,
    };

    let mut perms = fs::metadata(path).map_err(io_err)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).map_err(io_err)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), HookError> {
    Ok(())
}
