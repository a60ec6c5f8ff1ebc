//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Repository, Signature};
use serde_json::{Value, json};

use gptcommit::config::API_KEY_GIT_CONFIG;
use gptcommit::credential::{CredentialResolver, EnvSource, GitConfigSource};
use gptcommit::GitBridge;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one empty root commit and a local identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_str("commit.gpgsign", "false").unwrap();
        }

        let sig = Signature::now("Test User", "test@example.com")
            .expect("Failed to create signature");
        let tree_id = repo.index().unwrap().write_tree().expect("Failed to write tree");
        {
            let tree = repo.find_tree(tree_id).expect("Failed to find tree");
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
                .expect("Failed to create root commit");
        }

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self) -> GitBridge {
        GitBridge::new(self.path())
    }

    /// Write `content` to `name` and add it to the index.
    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Message of the commit HEAD points to.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD")
            .message()
            .unwrap_or_default()
            .to_string()
    }

    /// A commit-message file inside `.git`, pre-filled with `initial`.
    pub fn message_file(&self, initial: &str) -> PathBuf {
        let path = self.repo.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, initial).expect("Failed to write message file");
        path
    }

    /// Resolver that only looks at `gptcommit.apikey`, set to `key`.
    pub fn resolver_with_key(&self, key: &str) -> CredentialResolver {
        self.git().config_set(API_KEY_GIT_CONFIG, key).unwrap();
        CredentialResolver::new(vec![Box::new(GitConfigSource::default_key(self.git()))])
    }
}

/// Resolver whose only source is an environment variable nobody sets.
pub fn empty_resolver() -> CredentialResolver {
    CredentialResolver::new(vec![Box::new(EnvSource::new("GPTCOMMIT_TEST_NEVER_SET"))])
}

/// A minimal successful chat completion response.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}
