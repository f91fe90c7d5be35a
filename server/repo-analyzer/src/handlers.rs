//! HTTP handlers for the analyzer API.

use axum::{
  extract::{rejection::JsonRejection, State},
  http::StatusCode,
  Json,
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{error, info};

use crate::aggregate;
use crate::error::{ApiError, AppError};
use crate::github::RepoData;
use crate::insights::{self, InsightPayload};
use crate::state::AppState;
use crate::types::{AnalyzeRequest, AnalyzeResponse, HealthStatus, InsightsRequest};
use crate::url::parse_repo_url;

const ANALYSIS_FAILED: &str = "Analysis failed";
const INSIGHTS_FAILED: &str = "AI generation failed";

pub async fn health() -> Json<HealthStatus> {
  Json(HealthStatus {
    status: "Server is running".to_string(),
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
  })
}

pub async fn analyze_repo(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let Json(req) = payload.map_err(|e| bad_body(ANALYSIS_FAILED, e))?;
  let repo_url = non_blank(req.repo_url).ok_or_else(|| {
    AppError::missing("Missing repository URL", "Please provide a GitHub repository URL")
      .into_api(ANALYSIS_FAILED)
  })?;

  match analyze(&state, &repo_url, req.include_ai).await {
    Ok(response) => Ok(Json(response)),
    Err(e) => {
      error!(repo_url = %repo_url, error = %e, "analysis failed");
      Err(e.into_api(ANALYSIS_FAILED))
    }
  }
}

async fn analyze(
  state: &AppState,
  repo_url: &str,
  include_ai: bool,
) -> Result<AnalyzeResponse, AppError> {
  let slug = parse_repo_url(repo_url)?;
  info!(repo = %slug, "analyzing repository");

  let data = aggregate::collect(&state.github, &slug).await?;
  let score = health_engine::score(&data.to_bundle());
  info!(repo = %slug, total = score.total, grade = score.grade.letter.as_str(), "health score computed");

  let ai_analysis = if include_ai {
    Some(insights_for(state, &data, &score).await)
  } else {
    None
  };

  let mut response = AnalyzeResponse::new(&slug, data, score);
  response.ai_analysis = ai_analysis;
  Ok(response)
}

/// Score a client-supplied snapshot and return only the insight payload.
pub async fn generate_ai_insights(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<InsightPayload>, ApiError> {
  let Json(req) = payload.map_err(|e| bad_body(INSIGHTS_FAILED, e))?;
  let missing = || {
    AppError::missing("Missing required data", "Please provide repository URL and data")
      .into_api(INSIGHTS_FAILED)
  };
  let repo_url = non_blank(req.repo_url).ok_or_else(missing)?;
  let data = req.repo_data.ok_or_else(missing)?;

  let score = health_engine::score(&data.to_bundle());
  info!(repo_url = %repo_url, total = score.total, "generating insights for supplied data");
  Ok(Json(insights_for(&state, &data, &score).await))
}

async fn insights_for(
  state: &AppState,
  data: &RepoData,
  score: &health_engine::HealthScoreResult,
) -> InsightPayload {
  let provider = insights::select_provider(&state.config, &state.http);
  insights::generate_insights(provider.as_deref(), data, score).await
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn bad_body(error: &str, rejection: JsonRejection) -> ApiError {
  ApiError::new(StatusCode::BAD_REQUEST, error, rejection.body_text())
}
