//! Runtime configuration.
//!
//! Every component receives the piece of [`Config`] it needs at construction;
//! nothing reads process-wide state after startup except the environment
//! variable credential source.

use std::env;
use std::path::PathBuf;

use chrono::Duration;
use tracing::warn;

/// Environment variable holding the DeepSeek API key.
pub const API_KEY_ENV_VAR: &str = "DEEPSEEK_API_KEY";

/// Git config key used as the last-resort API key source.
pub const API_KEY_GIT_CONFIG: &str = "gptcommit.apikey";

/// Git config key toggling the prepare-commit-msg hook.
pub const ENABLED_GIT_CONFIG: &str = "gptcommit.enabled";

/// Keychain service name the API key is stored under.
pub const KEYCHAIN_SERVICE: &str = "deepseek-key";

/// Keychain account name the API key is stored under.
pub const KEYCHAIN_ACCOUNT: &str = "gptcommit";

/// Overrides the config directory.
const CONFIG_DIR_ENV_VAR: &str = "GPTCOMMIT_CONFIG_DIR";

/// Overrides the API base URL.
const BASE_URL_ENV_VAR: &str = "GPTCOMMIT_BASE_URL";

/// Overrides the chat model.
const MODEL_ENV_VAR: &str = "GPTCOMMIT_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Cached keys stay valid for a day.
pub const DEFAULT_CACHE_TTL_HOURS: i64 = 24;

const CACHE_FILE_NAME: &str = "api_key_cache.json";
const HOOK_FILE_NAME: &str = "prepare-commit-msg";

/// Settings for the chat completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Top-level configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-user directory holding the key cache and the hook template.
    pub config_dir: PathBuf,
    pub api: ApiConfig,
    pub cache_ttl: Duration,
}

impl Config {
    /// Build a config rooted at `config_dir` with default API settings.
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            api: ApiConfig::default(),
            cache_ttl: Duration::hours(DEFAULT_CACHE_TTL_HOURS),
        }
    }

    /// Build the config from defaults and `GPTCOMMIT_*` environment overrides.
    pub fn from_env() -> Self {
        let config_dir = non_empty_var(CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_dir);

        let mut config = Self::with_config_dir(config_dir);

        if let Some(base_url) = non_empty_var(BASE_URL_ENV_VAR) {
            config.api.base_url = base_url;
        }
        if let Some(model) = non_empty_var(MODEL_ENV_VAR) {
            config.api.model = model;
        }

        config
    }

    /// Location of the persisted API key cache record.
    pub fn cache_path(&self) -> PathBuf {
        self.config_dir.join(CACHE_FILE_NAME)
    }

    /// Location of the hook script copied into repositories on `enable`.
    pub fn hook_template_path(&self) -> PathBuf {
        self.config_dir.join("hooks").join(HOOK_FILE_NAME)
    }
}

/// `~/.config/gptcommit` on every platform, matching the hook installer.
fn default_config_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".config").join("gptcommit"),
        None => {
            warn!("Could not determine home directory, using ./.gptcommit");
            PathBuf::from(".gptcommit")
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
