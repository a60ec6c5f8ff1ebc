//! API key lookup across the keychain, the environment and git config.
//!
//! Sources are tried in priority order; the first non-empty value wins.

pub mod cache;
pub mod sources;

use std::fmt;

use tracing::debug;

use crate::error::CredentialError;
use crate::git::GitBridge;

pub use cache::{CacheEntry, KeyCache};
pub use sources::{CredentialSource, EnvSource, GitConfigSource, KeychainSource};

/// An API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw value, trimming whitespace. Blank values are not keys.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Ordered chain of credential sources.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Keychain, then `DEEPSEEK_API_KEY`, then `gptcommit.apikey` in the repo.
    pub fn with_default_sources(git: GitBridge) -> Self {
        Self::new(vec![
            Box::new(KeychainSource::default()),
            Box::new(EnvSource::default()),
            Box::new(GitConfigSource::default_key(git)),
        ])
    }

    /// Names of the configured sources, in lookup order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self) -> Result<ApiKey, CredentialError> {
        for source in &self.sources {
            match source.attempt() {
                Some(key) => {
                    debug!("API key found in {}", source.name());
                    return Ok(key);
                }
                None => debug!("No API key in {}", source.name()),
            }
        }

        Err(CredentialError::Missing)
    }
}
