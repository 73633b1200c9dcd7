//! Async chat-completion client.
//!
//! Speaks both the Anthropic messages format and the OpenAI-compatible chat
//! format; which one is picked from the endpoint URL.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{LlmError, LlmResult};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
const MAX_TOKENS: u32 = 1024;

/// Anything that can turn a system + user prompt into text.
///
/// [`LlmClient`] is the network implementation; tests substitute canned
/// responses.
pub trait Completion {
    fn complete(&self, system: &str, user: &str) -> impl Future<Output = LlmResult<String>> + Send;
}

/// Wire format of the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

impl ApiFormat {
    pub fn detect(url: &str) -> Self {
        if url.contains("anthropic.com") { ApiFormat::Anthropic } else { ApiFormat::OpenAI }
    }
}

pub struct LlmClient {
    client:     Client,
    api_key:    String,
    api_url:    String,
    model:      String,
    api_format: ApiFormat,
}

impl LlmClient {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>, model: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            client:     Client::new(),
            api_key:    api_key.into(),
            api_format: ApiFormat::detect(&api_url),
            api_url,
            model:      model.into(),
        }
    }

    /// Required: `LLM_API_KEY`.
    /// Optional: `LLM_API_URL` (default [`DEFAULT_API_URL`]), `LLM_MODEL`
    /// (default [`DEFAULT_MODEL`]).
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("LLM_API_KEY").map_err(|_| LlmError::MissingKey("LLM_API_KEY"))?;
        let api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, api_url, model))
    }

    pub fn api_format(&self) -> ApiFormat {
        self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> LlmResult<String> {
        let request = AnthropicRequest {
            model:      &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages:   vec![Message { role: "user", content: user }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let completion: AnthropicResponse = response.json().await?;
        completion.content.into_iter().next().map(|c| c.text).ok_or(LlmError::EmptyResponse)
    }

    async fn complete_openai(&self, system: &str, user: &str) -> LlmResult<String> {
        let request = OpenAIRequest::json_object(&self.model, system, user);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let completion: OpenAIResponse = response.json().await?;
        completion.choices.into_iter().next().map(|c| c.message.content).ok_or(LlmError::EmptyResponse)
    }
}

impl Completion for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> LlmResult<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }
}

async fn check_status(response: reqwest::Response) -> LlmResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api { status: status.as_u16(), body })
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model:      &'a str,
    max_tokens: u32,
    system:     &'a str,
    messages:   Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
pub(crate) struct OpenAIRequest<'a> {
    model:           &'a str,
    max_tokens:      u32,
    messages:        Vec<Message<'a>>,
    response_format: ResponseFormat,
}

impl<'a> OpenAIRequest<'a> {
    /// A request constrained to return a single JSON object.
    pub(crate) fn json_object(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message { role: "system", content: system }, Message { role: "user", content: user }],
            response_format: ResponseFormat { kind: "json_object" },
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct Message<'a> {
    role:    &'static str,
    content: &'a str,
}
