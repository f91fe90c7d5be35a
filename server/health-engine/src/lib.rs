//! Repository Health Engine: rule-based scoring, no AI, no network, no I/O.
//! Used by the analyzer service as a library and by the binary for stdin/stdout.

pub mod lenient;
mod score;
mod types;

use serde_json::Value;

pub use score::{
  commit_points, contributor_points, engagement_points, fork_ratio_points, grade_for,
  issue_points, readme_quality_points, score,
};
pub use types::{
  CommitSignal, ContributorSignal, Factor, Grade, GradeLetter, HealthScoreResult, IssueSignal,
  LicenseSignal, PopularitySignal, ReadmeSignal, RepositoryDataBundle, ScoreBreakdown,
};

/// Score a bundle that may be absent; a missing bundle yields the "No Data" result.
pub fn score_or_no_data(bundle: Option<&RepositoryDataBundle>) -> HealthScoreResult {
  match bundle {
    Some(b) => score(b),
    None => HealthScoreResult::no_data(),
  }
}

/// Score raw JSON input. Empty input, `null`, or anything that is not a JSON
/// object yields the "No Data" result; fields inside an object never fail.
pub fn score_json(raw: &str) -> HealthScoreResult {
  let bundle: Option<RepositoryDataBundle> = match serde_json::from_str(raw) {
    Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
    _ => None,
  };
  score_or_no_data(bundle.as_ref())
}
