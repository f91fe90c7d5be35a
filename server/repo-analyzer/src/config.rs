//! Service configuration with sane defaults, overridable from the environment.

use std::net::IpAddr;
use std::time::Duration;

use crate::error::AppError;

/// Runtime settings for the analyzer service.
#[derive(Debug, Clone)]
pub struct Config {
  pub host: IpAddr,
  pub port: u16,
  /// Allowed CORS origin; `None` means any origin.
  pub cors_origin: Option<String>,
  pub github_token: Option<String>,
  pub github_api_base: String,
  pub openai_api_key: Option<String>,
  pub openai_api_base: String,
  pub openai_model: String,
  pub gemini_api_key: Option<String>,
  pub gemini_api_base: String,
  pub gemini_model: String,
  /// Per-request timeout for outbound HTTP (GitHub and LLM providers).
  pub http_timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      host: IpAddr::from([0, 0, 0, 0]),
      port: 5000,
      cors_origin: None,
      github_token: None,
      github_api_base: "https://api.github.com".to_string(),
      openai_api_key: None,
      openai_api_base: "https://api.openai.com/v1".to_string(),
      openai_model: "gpt-3.5-turbo".to_string(),
      gemini_api_key: None,
      gemini_api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
      gemini_model: "gemini-2.5-flash".to_string(),
      http_timeout: Duration::from_secs(30),
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Self, AppError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from an arbitrary key lookup. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = Self::default();

    if let Some(host) = get("HOST") {
      config.host = host
        .parse()
        .map_err(|_| AppError::config("HOST", "must be an IP address"))?;
    }
    if let Some(port) = get("PORT") {
      config.port = port
        .parse()
        .map_err(|_| AppError::config("PORT", "must be a valid u16"))?;
    }
    if let Some(secs) = get("HTTP_TIMEOUT_SECS") {
      let secs: u64 = secs
        .parse()
        .map_err(|_| AppError::config("HTTP_TIMEOUT_SECS", "must be a whole number of seconds"))?;
      config.http_timeout = Duration::from_secs(secs);
    }

    config.cors_origin = get("CORS_ORIGIN").filter(|o| o != "*");
    config.github_token = get("GITHUB_TOKEN");
    config.openai_api_key = get("OPENAI_API_KEY");
    config.gemini_api_key = get("GEMINI_API_KEY");

    if let Some(base) = get("GITHUB_API_BASE") {
      config.github_api_base = base.trim_end_matches('/').to_string();
    }
    if let Some(base) = get("OPENAI_API_BASE") {
      config.openai_api_base = base.trim_end_matches('/').to_string();
    }
    if let Some(model) = get("OPENAI_MODEL") {
      config.openai_model = model;
    }
    if let Some(base) = get("GEMINI_API_BASE") {
      config.gemini_api_base = base.trim_end_matches('/').to_string();
    }
    if let Some(model) = get("GEMINI_MODEL") {
      config.gemini_model = model;
    }

    Ok(config)
  }
}
