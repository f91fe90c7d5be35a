//! Input/output types for the health engine (JSON contract with the analyzer service).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lenient::or_default;

// ---------------------------------------------------------------------------
// Input bundle
// ---------------------------------------------------------------------------

/// Normalized snapshot of repository signals. Every field defaults to zero/false
/// when absent, `null`, or of the wrong type, so any JSON object is scoreable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryDataBundle {
  #[serde(deserialize_with = "or_default")]
  pub readme: ReadmeSignal,
  #[serde(deserialize_with = "or_default")]
  pub license: LicenseSignal,
  #[serde(deserialize_with = "or_default")]
  pub issues: IssueSignal,
  #[serde(deserialize_with = "or_default")]
  pub commits: CommitSignal,
  #[serde(deserialize_with = "or_default")]
  pub contributors: ContributorSignal,
  #[serde(deserialize_with = "or_default")]
  pub popularity: PopularitySignal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadmeSignal {
  #[serde(deserialize_with = "or_default")]
  pub exists: bool,
  /// Character count of the README body.
  #[serde(deserialize_with = "or_default")]
  pub length: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseSignal {
  #[serde(deserialize_with = "or_default")]
  pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueSignal {
  #[serde(deserialize_with = "or_default")]
  pub open: u64,
  #[serde(deserialize_with = "or_default")]
  pub closed: u64,
  #[serde(deserialize_with = "or_default")]
  pub recent_activity_count: u64,
}

impl IssueSignal {
  pub fn total(&self) -> u64 {
    self.open.saturating_add(self.closed)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommitSignal {
  #[serde(deserialize_with = "or_default")]
  pub count_last_30_days: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContributorSignal {
  #[serde(deserialize_with = "or_default")]
  pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopularitySignal {
  #[serde(deserialize_with = "or_default")]
  pub stars: u64,
  #[serde(deserialize_with = "or_default")]
  pub forks: u64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Scoring factor; serialized as the breakdown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
  ReadmeExists,
  ReadmeQuality,
  License,
  IssuesManagement,
  IssuesActivity,
  CommitFrequency,
  Contributors,
  CommunityEngagement,
}

/// Points awarded per factor. Only factors whose branch recorded a value are present.
pub type ScoreBreakdown = BTreeMap<Factor, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLetter {
  #[serde(rename = "A+")]
  APlus,
  A,
  B,
  C,
  D,
  F,
}

impl GradeLetter {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::APlus => "A+",
      Self::A => "A",
      Self::B => "B",
      Self::C => "C",
      Self::D => "D",
      Self::F => "F",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
  pub letter: GradeLetter,
  pub description: String,
}

impl Grade {
  pub fn new(letter: GradeLetter, description: &str) -> Self {
    Self {
      letter,
      description: description.to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScoreResult {
  /// Composite score, always within 0..=100.
  pub total: u32,
  pub breakdown: ScoreBreakdown,
  pub grade: Grade,
}

impl HealthScoreResult {
  /// Result for a request that carried no repository data at all.
  pub fn no_data() -> Self {
    Self {
      total: 0,
      breakdown: ScoreBreakdown::new(),
      grade: Grade::new(GradeLetter::F, "No Data"),
    }
  }
}
