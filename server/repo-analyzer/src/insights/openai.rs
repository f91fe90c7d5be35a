//! OpenAI chat-completions provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{parse_payload, InsightError, InsightPayload, InsightProvider};
use crate::config::Config;

const SYSTEM_PROMPT: &str =
  "You are an expert GitHub repository analyst. Provide insights in valid JSON format only.";

pub struct OpenAiProvider {
  http: reqwest::Client,
  api_base: String,
  api_key: String,
  model: String,
}

impl OpenAiProvider {
  pub fn new(http: reqwest::Client, config: &Config, api_key: &str) -> Self {
    Self {
      http,
      api_base: config.openai_api_base.clone(),
      api_key: api_key.to_string(),
      model: config.openai_model.clone(),
    }
  }
}

#[async_trait]
impl InsightProvider for OpenAiProvider {
  fn name(&self) -> &'static str {
    "openai"
  }

  async fn generate(&self, prompt: &str) -> Result<InsightPayload, InsightError> {
    let body = ChatRequest {
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
      temperature: 0.7,
      max_tokens: 1500,
      response_format: ResponseFormat {
        kind: "json_object",
      },
    };

    let response = self
      .http
      .post(format!("{}/chat/completions", self.api_base))
      .bearer_auth(&self.api_key)
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(InsightError::Api {
        status: status.as_u16(),
        message,
      });
    }

    let reply: ChatResponse = response
      .json()
      .await
      .map_err(|e| InsightError::Parse(e.to_string()))?;
    let content = reply
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| InsightError::Parse("no response choices".to_string()))?;
    parse_payload(&content)
  }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessage<'a>>,
  temperature: f32,
  max_tokens: u32,
  response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
  #[serde(rename = "type")]
  kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
  content: Option<String>,
}
