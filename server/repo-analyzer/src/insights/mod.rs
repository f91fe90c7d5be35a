//! AI insight generation: prompt building, provider strategy, and fallbacks.
//!
//! Providers are tried in a fixed priority order (OpenAI, then Gemini); the
//! first one with a configured key handles the request. Failures never reach
//! the caller: they become a fallback payload with an explanatory summary.

mod gemini;
mod openai;
mod prompt;

use async_trait::async_trait;
use health_engine::HealthScoreResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::github::RepoData;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use prompt::build_prompt;

pub const UNAVAILABLE_SUMMARY: &str =
  "AI analysis unavailable. Please configure an API key for OpenAI or Google Gemini.";
pub const FAILED_SUMMARY: &str =
  "Unable to generate AI insights at this time. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightPayload {
  pub summary: String,
  pub strengths: Vec<String>,
  pub suggestions: Vec<Suggestion>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl InsightPayload {
  pub fn unavailable() -> Self {
    Self {
      summary: UNAVAILABLE_SUMMARY.to_string(),
      ..Default::default()
    }
  }

  pub fn failed(error: impl Into<String>) -> Self {
    Self {
      summary: FAILED_SUMMARY.to_string(),
      error: Some(error.into()),
      ..Default::default()
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
  /// `High`, `Medium`, or `Low`.
  pub priority: String,
  /// e.g. `Documentation`, `Maintenance`, `Community`, `Testing`, `Security`, `Quality`.
  pub category: String,
  pub title: String,
  pub description: String,
}

#[derive(Debug, Error)]
pub enum InsightError {
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("provider error: {status} - {message}")]
  Api { status: u16, message: String },

  #[error("invalid provider response: {0}")]
  Parse(String),
}

/// One LLM backend able to answer the analysis prompt.
#[async_trait]
pub trait InsightProvider: Send + Sync {
  fn name(&self) -> &'static str;

  async fn generate(&self, prompt: &str) -> Result<InsightPayload, InsightError>;
}

/// First provider with a configured credential, in priority order.
pub fn select_provider(
  config: &Config,
  http: &reqwest::Client,
) -> Option<Box<dyn InsightProvider>> {
  if let Some(key) = &config.openai_api_key {
    return Some(Box::new(OpenAiProvider::new(http.clone(), config, key)));
  }
  if let Some(key) = &config.gemini_api_key {
    return Some(Box::new(GeminiProvider::new(http.clone(), config, key)));
  }
  None
}

/// Ask the provider for insights; never fails.
pub async fn generate_insights(
  provider: Option<&dyn InsightProvider>,
  data: &RepoData,
  score: &HealthScoreResult,
) -> InsightPayload {
  let Some(provider) = provider else {
    warn!("no AI provider configured");
    return InsightPayload::unavailable();
  };

  let prompt = build_prompt(data, score);
  info!(provider = provider.name(), "generating AI insights");
  match provider.generate(&prompt).await {
    Ok(payload) => payload,
    Err(e) => {
      warn!(provider = provider.name(), error = %e, "AI insight generation failed");
      InsightPayload::failed(e.to_string())
    }
  }
}

/// Parse a model reply, unwrapping a ```json fenced block if present.
pub fn parse_payload(text: &str) -> Result<InsightPayload, InsightError> {
  serde_json::from_str(extract_json(text)).map_err(|e| InsightError::Parse(e.to_string()))
}

fn extract_json(text: &str) -> &str {
  if let Some(start) = text.find("```json") {
    let body = &text[start + "```json".len()..];
    if let Some(end) = body.find("```") {
      return body[..end].trim();
    }
  }
  text.trim()
}
