//! Chat completion client for the DeepSeek (OpenAI-compatible) API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::credential::ApiKey;
use crate::error::LlmError;
use crate::llm::prompt::{Language, SYSTEM_PROMPT, build_commit_prompt};

/// Produces a commit message for a staged diff.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator {
    async fn generate(&self, diff: &str, language: Language) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// One-shot, non-streaming chat completion client.
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: ApiKey,
}

impl ChatClient {
    pub fn new(api: &ApiConfig, api_key: ApiKey) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gptcommit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", api.base_url.trim_end_matches('/')),
            model: api.model.clone(),
            api_key,
        })
    }

    /// Send `prompt` and return the first choice's content verbatim.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };

        debug!("POST {} (model {}, prompt {} chars)", self.endpoint, self.model, prompt.len());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmError::Request {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(LlmError::Decode)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl MessageGenerator for ChatClient {
    async fn generate(&self, diff: &str, language: Language) -> Result<String, LlmError> {
        let prompt = build_commit_prompt(diff, language);
        self.complete(&prompt).await
    }
}
