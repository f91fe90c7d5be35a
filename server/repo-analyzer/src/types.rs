//! Request/response types for the analyzer API.

use health_engine::lenient::or_default;
use health_engine::HealthScoreResult;
use serde::{Deserialize, Serialize};

use crate::github::types::{Contributor, DailyCommits, LanguageShare, RepoData};
use crate::insights::InsightPayload;
use crate::url::RepoSlug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
  #[serde(default)]
  pub repo_url: Option<String>,
  #[serde(default, rename = "includeAI")]
  pub include_ai: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
  #[serde(default)]
  pub repo_url: Option<String>,
  /// `null` or a non-object counts as missing.
  #[serde(default, deserialize_with = "or_default")]
  pub repo_data: Option<RepoData>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
  pub status: String,
  pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
  pub repository: RepositorySummary,
  pub health_score: HealthScoreResult,
  pub stats: RepoStats,
  pub charts: Charts,
  /// Echoed back by the client for a later insights-only call.
  #[serde(rename = "_rawData")]
  pub raw_data: RepoData,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ai_analysis: Option<InsightPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
  pub name: String,
  pub full_name: String,
  pub description: Option<String>,
  pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
  pub stars: u64,
  pub forks: u64,
  pub watchers: u64,
  pub open_issues: u64,
  pub closed_issues: u64,
  pub contributors: u64,
  pub language: String,
  pub last_commit: Option<String>,
  pub has_license: bool,
  pub license: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
  pub commit_activity: Vec<DailyCommits>,
  pub languages: Vec<LanguageShare>,
  pub top_contributors: Vec<Contributor>,
  pub issues: IssueChart,
}

#[derive(Debug, Serialize)]
pub struct IssueChart {
  pub open: u64,
  pub closed: u64,
}

impl AnalyzeResponse {
  pub fn new(slug: &RepoSlug, data: RepoData, health_score: HealthScoreResult) -> Self {
    let info = &data.info;
    let repository = RepositorySummary {
      name: info.name.clone(),
      full_name: info.full_name.clone(),
      description: info.description.clone(),
      url: slug.html_url(),
    };
    let stats = RepoStats {
      stars: info.stars,
      forks: info.forks,
      watchers: info.watchers,
      open_issues: data.issues.open,
      closed_issues: data.issues.closed,
      contributors: data.contributors.total,
      language: data.languages.primary.clone(),
      last_commit: info.last_commit_date.clone(),
      has_license: info.has_license,
      license: info.license.clone(),
    };
    let charts = Charts {
      commit_activity: data.commits.chart_data.clone(),
      languages: data.languages.languages.clone(),
      top_contributors: data.contributors.top.clone(),
      issues: IssueChart {
        open: data.issues.open,
        closed: data.issues.closed,
      },
    };

    Self {
      repository,
      health_score,
      stats,
      charts,
      raw_data: data,
      ai_analysis: None,
    }
  }
}
