//! GitHub client and aggregation against a local stub.

mod common;

use repo_analyzer::github::GithubClient;
use repo_analyzer::url::parse_repo_url;
use repo_analyzer::{collect, AppError};

async fn client() -> GithubClient {
  let base = common::spawn(common::github_stub()).await;
  GithubClient::new(reqwest::Client::new(), &common::config_for(&base))
}

#[tokio::test]
async fn collects_every_signal_for_healthy_repo() {
  let github = client().await;
  let slug = parse_repo_url("octo/widget").unwrap();
  let data = collect(&github, &slug).await.unwrap();

  assert_eq!(data.info.full_name, "octo/widget");
  assert!(data.info.has_license);
  assert_eq!(data.info.license.as_deref(), Some("MIT License"));
  assert_eq!(data.info.last_commit_date.as_deref(), Some("2025-02-01T12:00:00Z"));

  assert!(data.readme.exists);
  assert_eq!(data.readme.length, 675);
  assert_eq!(data.readme.content.chars().count(), 675);

  assert_eq!(data.commits.total_commits, 12);
  assert_eq!(data.commits.chart_data.len(), 30);
  assert_eq!(data.commits.chart_data.iter().map(|d| d.commits).sum::<u64>(), 12);

  assert_eq!(data.contributors.total, 7);
  assert_eq!(data.contributors.top[0].login, "dev0");

  assert_eq!(data.languages.primary, "Rust");
  assert_eq!(data.languages.languages[0].percentage, "90.00");

  assert_eq!(data.issues.open, 2);
  assert_eq!(data.issues.closed, 8);
  assert_eq!(data.issues.total, 10);
  assert_eq!(data.issues.recent, 3);
}

#[tokio::test]
async fn secondary_failures_degrade_to_defaults() {
  let github = client().await;
  let slug = parse_repo_url("octo/bare").unwrap();
  let data = collect(&github, &slug).await.unwrap();

  assert!(!data.readme.exists);
  assert_eq!(data.commits.total_commits, 0);
  assert!(data.commits.chart_data.is_empty());
  assert_eq!(data.contributors.total, 0);
  assert_eq!(data.languages.primary, "Unknown");
  assert_eq!(data.issues.total, 0);
  assert!(data.info.last_commit_date.is_none());

  let score = health_engine::score(&data.to_bundle());
  assert_eq!(score.total, 10);
  assert_eq!(score.breakdown.len(), 1);
}

#[tokio::test]
async fn missing_repository_is_fatal() {
  let github = client().await;
  let slug = parse_repo_url("octo/nope").unwrap();
  assert!(matches!(collect(&github, &slug).await, Err(AppError::RepoNotFound)));
}

#[tokio::test]
async fn forbidden_metadata_is_rate_limited() {
  let github = client().await;
  let slug = parse_repo_url("octo/limited").unwrap();
  assert!(matches!(collect(&github, &slug).await, Err(AppError::RateLimited)));
}
