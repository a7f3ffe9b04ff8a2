//! OpenAI API integration.
//!
//! Implements the CompletionProvider trait for OpenAI chat models.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AIError, CompletionProvider};
use crate::core::{api_key_from_env, AiConfig};

/// OpenAI chat-completion provider.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl OpenAIProvider {
    /// Create a provider from the `[ai]` config section.
    pub fn with_config(api_key: impl Into<String>, config: &AiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
        }
    }

    /// Create a provider reading the key from OPENAI_API_KEY.
    pub fn from_env(config: &AiConfig) -> anyhow::Result<Self> {
        let api_key = api_key_from_env()?;
        Ok(Self::with_config(api_key, config))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage { role: "user".to_string(), content: prompt.to_string() }],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = self.build_request(prompt);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Requesting completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "Completion request failed");
            return Err(AIError::ApiError { status, body }.into());
        }

        let response: OpenAIResponse = response.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AIError::NoResponse.into())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}
