//! Aggregated repository data (JSON contract with the web client) and its
//! normalization into the scorer bundle.

use health_engine::{
  CommitSignal, ContributorSignal, IssueSignal, LicenseSignal, PopularitySignal, ReadmeSignal,
  RepositoryDataBundle,
};
use health_engine::lenient::or_default;
use serde::{Deserialize, Serialize};

/// Everything fetched for one repository. The client echoes this back as
/// `repoData` for a later insights-only call, so every field falls back to its
/// default when absent, `null`, or mistyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepoData {
  #[serde(deserialize_with = "or_default")]
  pub info: RepoInfo,
  #[serde(deserialize_with = "or_default")]
  pub readme: Readme,
  #[serde(deserialize_with = "or_default")]
  pub commits: CommitActivity,
  #[serde(deserialize_with = "or_default")]
  pub contributors: Contributors,
  #[serde(deserialize_with = "or_default")]
  pub languages: Languages,
  #[serde(deserialize_with = "or_default")]
  pub issues: Issues,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepoInfo {
  #[serde(deserialize_with = "or_default")]
  pub name: String,
  #[serde(deserialize_with = "or_default")]
  pub full_name: String,
  #[serde(deserialize_with = "or_default")]
  pub description: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub stars: u64,
  #[serde(deserialize_with = "or_default")]
  pub forks: u64,
  #[serde(deserialize_with = "or_default")]
  pub watchers: u64,
  #[serde(deserialize_with = "or_default")]
  pub open_issues: u64,
  #[serde(deserialize_with = "or_default")]
  pub language: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub created_at: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub updated_at: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub pushed_at: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub has_license: bool,
  #[serde(deserialize_with = "or_default")]
  pub license: Option<String>,
  #[serde(deserialize_with = "or_default")]
  pub default_branch: String,
  #[serde(deserialize_with = "or_default")]
  pub topics: Vec<String>,
  #[serde(deserialize_with = "or_default")]
  pub last_commit_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Readme {
  #[serde(deserialize_with = "or_default")]
  pub exists: bool,
  #[serde(deserialize_with = "or_default")]
  pub length: u64,
  /// First 1000 characters, for the insight prompt.
  #[serde(deserialize_with = "or_default")]
  pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommitActivity {
  #[serde(deserialize_with = "or_default")]
  pub total_commits: u64,
  #[serde(deserialize_with = "or_default")]
  pub chart_data: Vec<DailyCommits>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCommits {
  /// `YYYY-MM-DD` (UTC).
  #[serde(deserialize_with = "or_default")]
  pub date: String,
  #[serde(deserialize_with = "or_default")]
  pub commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributors {
  #[serde(deserialize_with = "or_default")]
  pub total: u64,
  #[serde(deserialize_with = "or_default")]
  pub top: Vec<Contributor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
  #[serde(deserialize_with = "or_default")]
  pub login: String,
  #[serde(deserialize_with = "or_default")]
  pub contributions: u64,
  #[serde(deserialize_with = "or_default")]
  pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Languages {
  #[serde(deserialize_with = "or_default")]
  pub languages: Vec<LanguageShare>,
  #[serde(deserialize_with = "or_default")]
  pub primary: String,
}

impl Default for Languages {
  fn default() -> Self {
    Self {
      languages: Vec::new(),
      primary: "Unknown".to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageShare {
  #[serde(deserialize_with = "or_default")]
  pub name: String,
  #[serde(deserialize_with = "or_default")]
  pub bytes: u64,
  /// Share of total bytes, two decimals (e.g. `"63.20"`).
  #[serde(deserialize_with = "or_default")]
  pub percentage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issues {
  #[serde(deserialize_with = "or_default")]
  pub open: u64,
  #[serde(deserialize_with = "or_default")]
  pub closed: u64,
  #[serde(deserialize_with = "or_default")]
  pub total: u64,
  /// Issues touched among the 30 most recently updated.
  #[serde(deserialize_with = "or_default")]
  pub recent: u64,
}

impl RepoData {
  /// Normalize into the scorer's input. Missing sections are already zero/false.
  pub fn to_bundle(&self) -> RepositoryDataBundle {
    RepositoryDataBundle {
      readme: ReadmeSignal {
        exists: self.readme.exists,
        length: self.readme.length,
      },
      license: LicenseSignal {
        present: self.info.has_license,
      },
      issues: IssueSignal {
        open: self.issues.open,
        closed: self.issues.closed,
        recent_activity_count: self.issues.recent,
      },
      commits: CommitSignal {
        count_last_30_days: self.commits.total_commits,
      },
      contributors: ContributorSignal {
        total: self.contributors.total,
      },
      popularity: PopularitySignal {
        stars: self.info.stars,
        forks: self.info.forks,
      },
    }
  }
}
