//! End-to-end tests for the hook and interactive flows with a mocked API.

mod common;

use std::fs;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gptcommit::app::{
    HookCommand, HookEnv, HookOutcome, InteractiveOutcome, InteractiveRequest, Prompter,
    run_hook, run_interactive,
};
use gptcommit::config::{ApiConfig, Config, ENABLED_GIT_CONFIG};
use gptcommit::{ChatClient, CredentialError, HookManager, KeyCache, Language};

use common::{TestRepo, completion_body, empty_resolver};

const README_CHANGE: &str = "# demo\n\nA one-line readme.\n";

struct Answer(&'static str);

impl Prompter for Answer {
    fn ask(&mut self, _question: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

fn config_for(server: &MockServer, dir: &std::path::Path) -> Config {
    let mut config = Config::with_config_dir(dir);
    config.api = ApiConfig {
        base_url: server.uri(),
        model: "deepseek-chat".to_string(),
    };
    config
}

async fn mount_completion(server: &MockServer, content: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_hook_writes_generated_message_verbatim() {
    let server = MockServer::start().await;
    mount_completion(&server, "docs(readme): add project description", 1).await;

    let repo = TestRepo::new();
    repo.git().config_set(ENABLED_GIT_CONFIG, "true").unwrap();
    repo.stage("README.md", README_CHANGE);
    let file = repo.message_file("\n# Please enter the commit message for your changes.\n");

    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = repo.resolver_with_key("sk-hook");
    let cache = KeyCache::new(config.cache_path(), config.cache_ttl);
    let manager = HookManager::new(git.clone(), config.hook_template_path());

    let outcome = run_hook(
        HookEnv {
            git: &git,
            credentials: &resolver,
            cache: &cache,
            manager: &manager,
        },
        HookCommand::Prepare {
            message_file: file.clone(),
        },
        Language::En,
        |key| ChatClient::new(&config.api, key),
    )
    .await
    .unwrap();

    assert_eq!(outcome, HookOutcome::Written(file.clone()));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "docs(readme): add project description"
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("+A one-line readme."));
}

#[tokio::test]
async fn test_hook_without_credentials_makes_no_request() {
    let server = MockServer::start().await;
    mount_completion(&server, "unused", 0).await;

    let repo = TestRepo::new();
    repo.git().config_set(ENABLED_GIT_CONFIG, "true").unwrap();
    repo.stage("README.md", README_CHANGE);
    let file = repo.message_file("");

    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = empty_resolver();
    let cache = KeyCache::new(config.cache_path(), config.cache_ttl);
    let manager = HookManager::new(git.clone(), config.hook_template_path());

    let err = run_hook(
        HookEnv {
            git: &git,
            credentials: &resolver,
            cache: &cache,
            manager: &manager,
        },
        HookCommand::Prepare { message_file: file },
        Language::En,
        |key| ChatClient::new(&config.api, key),
    )
    .await
    .unwrap_err();

    assert!(err.downcast_ref::<CredentialError>().is_some());
}

#[tokio::test]
async fn test_hook_with_empty_diff_makes_no_request() {
    let server = MockServer::start().await;
    mount_completion(&server, "unused", 0).await;

    let repo = TestRepo::new();
    repo.git().config_set(ENABLED_GIT_CONFIG, "true").unwrap();
    let file = repo.message_file("keep me");

    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = repo.resolver_with_key("sk-hook");
    let cache = KeyCache::new(config.cache_path(), config.cache_ttl);
    let manager = HookManager::new(git.clone(), config.hook_template_path());

    let outcome = run_hook(
        HookEnv {
            git: &git,
            credentials: &resolver,
            cache: &cache,
            manager: &manager,
        },
        HookCommand::Prepare {
            message_file: file.clone(),
        },
        Language::En,
        |key| ChatClient::new(&config.api, key),
    )
    .await
    .unwrap();

    assert_eq!(outcome, HookOutcome::NothingStaged);
    assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
}

#[tokio::test]
async fn test_interactive_commit_with_generated_message() {
    let server = MockServer::start().await;
    mount_completion(&server, "docs(readme): add project description", 1).await;

    let repo = TestRepo::new();
    repo.stage("README.md", README_CHANGE);

    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = repo.resolver_with_key("sk-cli");

    let outcome = run_interactive(
        &git,
        &resolver,
        |key| ChatClient::new(&config.api, key),
        &mut Answer("Y"),
        InteractiveRequest {
            message: None,
            language: Language::En,
        },
    )
    .await
    .unwrap();

    assert!(matches!(outcome, InteractiveOutcome::Committed(_)));
    assert_eq!(
        repo.head_message().trim_end(),
        "docs(readme): add project description"
    );
}

#[tokio::test]
async fn test_interactive_empty_diff_makes_no_request() {
    let server = MockServer::start().await;
    mount_completion(&server, "unused", 0).await;

    let repo = TestRepo::new();
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = repo.resolver_with_key("sk-cli");

    let outcome = run_interactive(
        &git,
        &resolver,
        |key| ChatClient::new(&config.api, key),
        &mut Answer(""),
        InteractiveRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, InteractiveOutcome::NothingToCommit);
    assert_eq!(repo.head_message(), "init");
}

#[tokio::test]
async fn test_interactive_decline_leaves_repository_unchanged() {
    let server = MockServer::start().await;
    mount_completion(&server, "feat: something", 1).await;

    let repo = TestRepo::new();
    repo.stage("lib.rs", "pub fn demo() {}\n");
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, config_dir.path());
    let git = repo.git();
    let resolver = repo.resolver_with_key("sk-cli");

    let outcome = run_interactive(
        &git,
        &resolver,
        |key| ChatClient::new(&config.api, key),
        &mut Answer("no"),
        InteractiveRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, InteractiveOutcome::Declined);
    assert_eq!(repo.head_message(), "init");
    assert!(!git.staged_diff().unwrap().is_empty());
}
