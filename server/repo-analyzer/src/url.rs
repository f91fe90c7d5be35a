//! GitHub repository URL parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::AppError;

static GITHUB_URL: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"github\.com/([^/?#\s]+)/([^/?#\s]+)").expect("valid regex"));
static OWNER_REPO: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^([^/?#\s:]+)/([^/?#\s]+)$").expect("valid regex"));

/// `owner/repo` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
  pub owner: String,
  pub repo: String,
}

impl RepoSlug {
  pub fn html_url(&self) -> String {
    format!("https://github.com/{}/{}", self.owner, self.repo)
  }
}

impl fmt::Display for RepoSlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.repo)
  }
}

/// Accepts `https://github.com/owner/repo[...]`, `github.com/owner/repo`, or `owner/repo`.
pub fn parse_repo_url(input: &str) -> Result<RepoSlug, AppError> {
  let input = input.trim().trim_end_matches('/');
  let caps = GITHUB_URL
    .captures(input)
    .or_else(|| OWNER_REPO.captures(input))
    .ok_or(AppError::InvalidUrl)?;

  let owner = caps[1].to_string();
  let repo = caps[2].trim_end_matches(".git").to_string();
  if repo.is_empty() {
    return Err(AppError::InvalidUrl);
  }
  Ok(RepoSlug { owner, repo })
}
