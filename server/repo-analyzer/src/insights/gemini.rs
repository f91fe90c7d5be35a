//! Google Gemini `generateContent` provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{parse_payload, InsightError, InsightPayload, InsightProvider};
use crate::config::Config;

pub struct GeminiProvider {
  http: reqwest::Client,
  api_base: String,
  api_key: String,
  model: String,
}

impl GeminiProvider {
  pub fn new(http: reqwest::Client, config: &Config, api_key: &str) -> Self {
    Self {
      http,
      api_base: config.gemini_api_base.clone(),
      api_key: api_key.to_string(),
      model: config.gemini_model.clone(),
    }
  }
}

#[async_trait]
impl InsightProvider for GeminiProvider {
  fn name(&self) -> &'static str {
    "gemini"
  }

  async fn generate(&self, prompt: &str) -> Result<InsightPayload, InsightError> {
    let body = GenerateRequest {
      contents: vec![Content {
        parts: vec![Part { text: prompt }],
      }],
    };

    let response = self
      .http
      .post(format!("{}/models/{}:generateContent", self.api_base, self.model))
      .header("x-goog-api-key", &self.api_key)
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

    let reply: GenerateResponse = response
      .json()
      .await
      .map_err(|e| InsightError::Parse(e.to_string()))?;
    let text: String = reply
      .candidates
      .into_iter()
      .next()
      .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
      .unwrap_or_default();
    if text.is_empty() {
      return Err(InsightError::Parse("no candidates in response".to_string()));
    }
    parse_payload(&text)
  }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
  contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
  parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
  text: Option<String>,
}
