//! Fan-out/fan-in of the GitHub reads for one repository.

use tracing::debug;

use crate::error::AppError;
use crate::github::{GithubClient, RepoData};
use crate::url::RepoSlug;

/// Fetch every signal concurrently and assemble the snapshot.
///
/// Only the repository-metadata fetch is fatal; the others degrade to defaults.
/// The last-commit date needs the default branch, so it runs after the join.
pub async fn collect(github: &GithubClient, slug: &RepoSlug) -> Result<RepoData, AppError> {
  let (info, readme, commits, contributors, languages, issues) = tokio::join!(
    github.repo_info(slug),
    github.readme(slug),
    github.commit_activity(slug),
    github.contributors(slug),
    github.languages(slug),
    github.issues(slug),
  );
  let mut info = info?;

  if !info.default_branch.is_empty() {
    info.last_commit_date = github.last_commit_date(slug, &info.default_branch).await;
  }
  debug!(repo = %slug, commits = commits.total_commits, "repository data collected");

  Ok(RepoData {
    info,
    readme,
    commits,
    contributors,
    languages,
    issues,
  })
}
