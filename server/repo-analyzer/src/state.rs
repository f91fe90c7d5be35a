//! Shared, read-only service state.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::github::GithubClient;

pub struct AppState {
  pub config: Arc<Config>,
  /// Pooled client shared by the GitHub fetches and the insight providers.
  pub http: reqwest::Client,
  pub github: GithubClient,
}

impl AppState {
  pub fn new(config: Config) -> Result<Self, AppError> {
    let http = reqwest::Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .timeout(config.http_timeout)
      .build()?;
    let github = GithubClient::new(http.clone(), &config);
    Ok(Self {
      config: Arc::new(config),
      http,
      github,
    })
  }
}
