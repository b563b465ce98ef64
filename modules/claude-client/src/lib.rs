pub mod error;
pub mod types;

pub use error::{ClaudeError, Result};
pub use types::{ChatRequest, ChatResponse};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl ClaudeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// One-shot chat completion: system prompt + user message, text back.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model).system(system).user(user);

        tracing::debug!(model = %self.model, "Claude chat request");

        let url = format!("{ANTHROPIC_API_URL}/messages");
        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClaudeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed.text().ok_or(ClaudeError::EmptyResponse)
    }
}
