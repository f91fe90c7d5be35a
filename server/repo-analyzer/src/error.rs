//! Structured error types for the analyzer service.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{message}")]
  MissingField { error: String, message: String },

  #[error("Invalid GitHub URL. Please use format: https://github.com/owner/repo")]
  InvalidUrl,

  #[error("Repository not found. Please check the URL and make sure the repository is public.")]
  RepoNotFound,

  #[error("GitHub API rate limit exceeded. Please try again later or check your API token.")]
  RateLimited,

  #[error("Failed to fetch repository info: {0}")]
  Upstream(String),

  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("config: {key}: {reason}")]
  Config { key: String, reason: String },
}

impl AppError {
  pub fn missing(error: &str, message: &str) -> Self {
    Self::MissingField {
      error: error.to_string(),
      message: message.to_string(),
    }
  }

  pub fn config(key: &str, reason: &str) -> Self {
    Self::Config {
      key: key.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::MissingField { .. } | Self::InvalidUrl => StatusCode::BAD_REQUEST,
      Self::RepoNotFound => StatusCode::NOT_FOUND,
      Self::RateLimited | Self::Upstream(_) | Self::Http(_) | Self::Config { .. } => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  /// Convert into an HTTP error, using `error` as the body title unless the
  /// variant carries its own.
  pub fn into_api(self, error: &str) -> ApiError {
    let status = self.status();
    match self {
      Self::MissingField { error, message } => ApiError::new(status, error, message),
      other => ApiError::new(status, error, other.to_string()),
    }
  }
}

/// JSON error body: `{ "error": ..., "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
  pub message: String,
}

/// An error ready to be written as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub body: ErrorBody,
}

impl ApiError {
  pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      status,
      body: ErrorBody {
        error: error.into(),
        message: message.into(),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(self.body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_mapping() {
    assert_eq!(AppError::InvalidUrl.status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::RepoNotFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::RateLimited.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      AppError::Upstream("boom".into()).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn missing_field_keeps_its_own_title() {
    let api = AppError::missing("Missing repository URL", "Please provide a GitHub repository URL")
      .into_api("Analysis failed");
    assert_eq!(api.status, StatusCode::BAD_REQUEST);
    assert_eq!(api.body.error, "Missing repository URL");
  }

  #[test]
  fn other_errors_take_the_route_title() {
    let api = AppError::RepoNotFound.into_api("Analysis failed");
    assert_eq!(api.status, StatusCode::NOT_FOUND);
    assert_eq!(api.body.error, "Analysis failed");
    assert!(api.body.message.starts_with("Repository not found"));
  }
}
