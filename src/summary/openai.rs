//! OpenAI chat completions client

use crate::constants::api::OPENAI_CHAT_URL;
use crate::error::{Error, Result};
use crate::summary::TextGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a travel guide AI.";
const MAX_TOKENS: u32 = 750;
const TEMPERATURE: f32 = 0.7;

/// Chat completions client for landmark summaries
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
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
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn summary_prompt(landmark: &str, language: &str) -> String {
        format!(
            "Write a short, informative, and engaging historical summary about the landmark called '{}' in {}. \
             Ensure the full summary fits within 500 words and is complete.",
            landmark, language
        )
    }

    fn build_request(&self, landmark: &str, language: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::summary_prompt(landmark, language),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    fn extract_text(response: ChatResponse) -> Result<String> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::Provider("OpenAI returned no summary text".to_string()))
    }

    /// Historical summary of a landmark in the given language
    pub async fn landmark_summary(&self, landmark: &str, language: &str) -> Result<String> {
        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(landmark, language))
            .send()
            .await
            .map_err(|e| Error::Provider(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "OpenAI returned status: {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse OpenAI response: {}", e)))?;

        Self::extract_text(body)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn landmark_summary(&self, landmark: &str, language: &str) -> Result<String> {
        OpenAiClient::landmark_summary(self, landmark, language).await
    }
}
