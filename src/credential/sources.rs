//! Individual places an API key can come from.

use std::env;
use std::process::Command;

use tracing::debug;

use crate::config::{API_KEY_ENV_VAR, API_KEY_GIT_CONFIG, KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE};
use crate::credential::ApiKey;
use crate::git::GitBridge;

/// A single API key provider.
///
/// Lookup failures of any kind are reported as `None`; the resolver decides
/// what "nothing found anywhere" means.
pub trait CredentialSource {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    fn attempt(&self) -> Option<ApiKey>;
}

/// OS credential store (macOS Keychain, Windows Credential Manager, Linux keyutils).
#[derive(Debug, Clone)]
pub struct KeychainSource {
    service: String,
    account: String,
}

impl KeychainSource {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl Default for KeychainSource {
    fn default() -> Self {
        Self::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
    }
}

impl CredentialSource for KeychainSource {
    fn name(&self) -> &'static str {
        "keychain"
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    fn attempt(&self) -> Option<ApiKey> {
        let entry = match keyring::Entry::new(&self.service, &self.account) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Keychain entry {} unavailable: {}", self.service, e);
                return None;
            }
        };

        match entry.get_password() {
            Ok(secret) => ApiKey::from_raw(&secret),
            Err(e) => {
                debug!("Keychain lookup for {} failed: {}", self.service, e);
                self.attempt_any_account()
            }
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    fn attempt(&self) -> Option<ApiKey> {
        debug!("No OS keychain support on this platform ({})", self.service);
        None
    }
}

impl KeychainSource {
    /// Look up the first generic password for the service regardless of
    /// account, which is what `security add-generic-password -s <service>`
    /// without `-a` creates.
    #[cfg(target_os = "macos")]
    fn attempt_any_account(&self) -> Option<ApiKey> {
        find_generic_password("security", &self.service)
    }

    #[cfg(not(target_os = "macos"))]
    fn attempt_any_account(&self) -> Option<ApiKey> {
        None
    }
}

/// Run `<program> find-generic-password -s <service> -w` and read the secret.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn find_generic_password(program: &str, service: &str) -> Option<ApiKey> {
    let output = Command::new(program)
        .args(["find-generic-password", "-s", service, "-w"])
        .output()
        .map_err(|e| debug!("Could not run {}: {}", program, e))
        .ok()?;

    if !output.status.success() {
        debug!("{} found no password for {}", program, service);
        return None;
    }

    ApiKey::from_raw(&String::from_utf8_lossy(&output.stdout))
}

/// Environment variable.
#[derive(Debug, Clone)]
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new(API_KEY_ENV_VAR)
    }
}

impl CredentialSource for EnvSource {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn attempt(&self) -> Option<ApiKey> {
        env::var(&self.var).ok().and_then(|v| ApiKey::from_raw(&v))
    }
}

/// Repository-scoped git config key.
#[derive(Debug, Clone)]
pub struct GitConfigSource {
    git: GitBridge,
    key: String,
}

impl GitConfigSource {
    pub fn new(git: GitBridge, key: impl Into<String>) -> Self {
        Self {
            git,
            key: key.into(),
        }
    }

    /// The `gptcommit.apikey` key in the repository at `git`'s workdir.
    pub fn default_key(git: GitBridge) -> Self {
        Self::new(git, API_KEY_GIT_CONFIG)
    }
}

impl CredentialSource for GitConfigSource {
    fn name(&self) -> &'static str {
        "git config"
    }

    fn attempt(&self) -> Option<ApiKey> {
        self.git
            .config_get(&self.key)
            .and_then(|v| ApiKey::from_raw(&v))
    }
}
