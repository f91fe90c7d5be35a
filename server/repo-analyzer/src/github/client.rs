//! GitHub REST client. One request per signal, single page only.
//!
//! `repo_info` is the primary fetch and fails with a typed error. Every other
//! fetch logs and falls back to its empty default.

use chrono::{Duration, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

use super::types::*;
use crate::config::Config;
use crate::date;
use crate::error::AppError;
use crate::url::RepoSlug;

const API_VERSION: &str = "2022-11-28";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";
const README_PREVIEW_CHARS: usize = 1000;

static LAST_PAGE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"[?&]page=(\d+)>;\s*rel="last""#).expect("valid regex"));

#[derive(Debug, Clone)]
pub struct GithubClient {
  http: reqwest::Client,
  api_base: String,
  token: Option<String>,
}

impl GithubClient {
  pub fn new(http: reqwest::Client, config: &Config) -> Self {
    Self {
      http,
      api_base: config.github_api_base.clone(),
      token: config.github_token.clone(),
    }
  }

  fn get(&self, path: &str) -> RequestBuilder {
    self.get_as(path, ACCEPT_JSON)
  }

  fn get_as(&self, path: &str, accept: &str) -> RequestBuilder {
    let req = self
      .http
      .get(format!("{}{}", self.api_base, path))
      .header(header::ACCEPT, accept)
      .header("X-GitHub-Api-Version", API_VERSION);
    match &self.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn send(req: RequestBuilder) -> Result<Response, AppError> {
    let response = req.send().await?;
    match response.status() {
      s if s.is_success() => Ok(response),
      StatusCode::NOT_FOUND => Err(AppError::RepoNotFound),
      StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited),
      s => Err(AppError::Upstream(format!("GitHub responded with HTTP {}", s))),
    }
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T, AppError> {
    Ok(Self::send(self.get(path).query(query)).await?.json().await?)
  }

  /// Repository metadata. Failure aborts the analysis.
  pub async fn repo_info(&self, slug: &RepoSlug) -> Result<RepoInfo, AppError> {
    let raw: RawRepo = self
      .get_json(&format!("/repos/{}", slug), &[])
      .await
      .map_err(|e| match e {
        AppError::Http(err) => AppError::Upstream(err.to_string()),
        other => other,
      })?;

    Ok(RepoInfo {
      name: raw.name,
      full_name: raw.full_name,
      description: raw.description,
      stars: raw.stargazers_count,
      forks: raw.forks_count,
      watchers: raw.watchers_count,
      open_issues: raw.open_issues_count,
      language: raw.language,
      created_at: raw.created_at,
      updated_at: raw.updated_at,
      pushed_at: raw.pushed_at,
      has_license: raw.license.is_some(),
      license: raw.license.and_then(|l| l.name),
      default_branch: raw.default_branch,
      topics: raw.topics,
      last_commit_date: None,
    })
  }

  pub async fn readme(&self, slug: &RepoSlug) -> Readme {
    or_default("readme", slug, self.try_readme(slug).await)
  }

  async fn try_readme(&self, slug: &RepoSlug) -> Result<Readme, AppError> {
    let req = self.get_as(&format!("/repos/{}/readme", slug), ACCEPT_RAW);
    let text = Self::send(req).await?.text().await?;
    Ok(Readme {
      exists: true,
      length: text.chars().count() as u64,
      content: text.chars().take(README_PREVIEW_CHARS).collect(),
    })
  }

  /// Commits in the last 30 days (first page of 100) plus a per-day chart.
  pub async fn commit_activity(&self, slug: &RepoSlug) -> CommitActivity {
    or_default("commit activity", slug, self.try_commit_activity(slug).await)
  }

  async fn try_commit_activity(&self, slug: &RepoSlug) -> Result<CommitActivity, AppError> {
    let now = Utc::now();
    let since = (now - Duration::days(date::ACTIVITY_WINDOW_DAYS as i64))
      .to_rfc3339_opts(SecondsFormat::Millis, true);
    let commits: Vec<RawCommit> = self
      .get_json(
        &format!("/repos/{}/commits", slug),
        &[("since", since.as_str()), ("per_page", "100")],
      )
      .await?;

    let chart_data = date::daily_commit_chart(
      commits.iter().filter_map(|c| c.author_date()),
      now.date_naive(),
    );
    Ok(CommitActivity {
      total_commits: commits.len() as u64,
      chart_data,
    })
  }

  pub async fn contributors(&self, slug: &RepoSlug) -> Contributors {
    or_default("contributors", slug, self.try_contributors(slug).await)
  }

  async fn try_contributors(&self, slug: &RepoSlug) -> Result<Contributors, AppError> {
    let raw: Vec<RawContributor> = self
      .get_json(&format!("/repos/{}/contributors", slug), &[("per_page", "10")])
      .await?;
    Ok(Contributors {
      total: raw.len() as u64,
      top: raw
        .into_iter()
        .take(10)
        .map(|c| Contributor {
          login: c.login,
          contributions: c.contributions,
          avatar: c.avatar_url,
        })
        .collect(),
    })
  }

  pub async fn languages(&self, slug: &RepoSlug) -> Languages {
    or_default("languages", slug, self.try_languages(slug).await)
  }

  async fn try_languages(&self, slug: &RepoSlug) -> Result<Languages, AppError> {
    let raw: HashMap<String, u64> = self
      .get_json(&format!("/repos/{}/languages", slug), &[])
      .await?;
    Ok(language_shares(raw))
  }

  /// Open/closed counts from the `Link` header of single-item pages, plus the
  /// number of issues among the 30 most recently updated.
  pub async fn issues(&self, slug: &RepoSlug) -> Issues {
    or_default("issues", slug, self.try_issues(slug).await)
  }

  async fn try_issues(&self, slug: &RepoSlug) -> Result<Issues, AppError> {
    let path = format!("/repos/{}/issues", slug);
    let open = self.count_issues(&path, "open").await?;
    let closed = self.count_issues(&path, "closed").await?;
    let recent: Vec<serde_json::Value> = self
      .get_json(&path, &[("state", "all"), ("per_page", "30"), ("sort", "updated")])
      .await?;

    Ok(Issues {
      open,
      closed,
      total: open + closed,
      recent: recent.len() as u64,
    })
  }

  async fn count_issues(&self, path: &str, state: &str) -> Result<u64, AppError> {
    let response = Self::send(self.get(path).query(&[("state", state), ("per_page", "1")])).await?;
    let last_page = response
      .headers()
      .get(header::LINK)
      .and_then(|v| v.to_str().ok())
      .and_then(last_page_from_link);
    match last_page {
      Some(n) => Ok(n),
      None => Ok(response.json::<Vec<serde_json::Value>>().await?.len() as u64),
    }
  }

  /// Author date of the head commit on `branch`; `None` on any failure.
  pub async fn last_commit_date(&self, slug: &RepoSlug, branch: &str) -> Option<String> {
    let result: Result<RawCommit, AppError> = self
      .get_json(&format!("/repos/{}/commits/{}", slug, branch), &[])
      .await;
    match result {
      Ok(commit) => commit.author_date().map(str::to_string),
      Err(e) => {
        warn!(repo = %slug, error = %e, "last commit fetch failed");
        None
      }
    }
  }
}

fn or_default<T: Default>(what: &str, slug: &RepoSlug, result: Result<T, AppError>) -> T {
  result.unwrap_or_else(|e| {
    warn!(repo = %slug, error = %e, "{} fetch failed, using defaults", what);
    T::default()
  })
}

/// Page number of the `rel="last"` link, if any.
pub fn last_page_from_link(link: &str) -> Option<u64> {
  LAST_PAGE.captures(link)?.get(1)?.as_str().parse().ok()
}

/// Languages ordered by bytes (largest first, ties by name) with two-decimal shares.
pub fn language_shares(raw: HashMap<String, u64>) -> Languages {
  let total: u64 = raw.values().sum();
  let mut entries: Vec<(String, u64)> = raw.into_iter().collect();
  entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

  let languages: Vec<LanguageShare> = entries
    .into_iter()
    .map(|(name, bytes)| {
      let pct = if total == 0 {
        0.0
      } else {
        bytes as f64 / total as f64 * 100.0
      };
      LanguageShare {
        name,
        bytes,
        percentage: format!("{:.2}", pct),
      }
    })
    .collect();

  let primary = languages
    .first()
    .map(|l| l.name.clone())
    .unwrap_or_else(|| "Unknown".to_string());
  Languages { languages, primary }
}

// ---------------------------------------------------------------------------
// GitHub wire types (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRepo {
  #[serde(default)]
  name: String,
  #[serde(default)]
  full_name: String,
  description: Option<String>,
  #[serde(default)]
  stargazers_count: u64,
  #[serde(default)]
  forks_count: u64,
  #[serde(default)]
  watchers_count: u64,
  #[serde(default)]
  open_issues_count: u64,
  language: Option<String>,
  created_at: Option<String>,
  updated_at: Option<String>,
  pushed_at: Option<String>,
  license: Option<RawLicense>,
  #[serde(default)]
  default_branch: String,
  #[serde(default)]
  topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLicense {
  name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCommit {
  commit: RawCommitDetail,
}

#[derive(Debug, Deserialize)]
struct RawCommitDetail {
  author: Option<RawSignature>,
}

#[derive(Debug, Deserialize)]
struct RawSignature {
  date: Option<String>,
}

impl RawCommit {
  fn author_date(&self) -> Option<&str> {
    self.commit.author.as_ref()?.date.as_deref()
  }
}

#[derive(Debug, Deserialize)]
struct RawContributor {
  #[serde(default)]
  login: String,
  #[serde(default)]
  contributions: u64,
  #[serde(default)]
  avatar_url: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn last_page_is_read_from_link_header() {
    let link = r#"<https://api.github.com/repositories/1/issues?state=open&per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/issues?state=open&per_page=1&page=57>; rel="last""#;
    assert_eq!(last_page_from_link(link), Some(57));
    assert_eq!(
      last_page_from_link(r#"<https://x/issues?page=1>; rel="prev""#),
      None
    );
  }

  #[test]
  fn language_shares_sorted_with_primary() {
    let raw = HashMap::from([
      ("Shell".to_string(), 100),
      ("Rust".to_string(), 700),
      ("Python".to_string(), 200),
    ]);
    let langs = language_shares(raw);
    assert_eq!(langs.primary, "Rust");
    let names: Vec<&str> = langs.languages.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Rust", "Python", "Shell"]);
    assert_eq!(langs.languages[0].percentage, "70.00");
    assert_eq!(langs.languages[2].percentage, "10.00");
  }

  #[test]
  fn empty_languages_default_to_unknown() {
    let langs = language_shares(HashMap::new());
    assert_eq!(langs.primary, "Unknown");
    assert!(langs.languages.is_empty());
  }
}
