//! Health score: per-factor points, capped subtotals, and letter grade.
//!
//! Maximum points per factor: README 10 + 10, license 15, issues 20,
//! commits 20, contributors 10, community engagement 15 (total 100).
//! Ratios are evaluated with integer cross-multiplication so floors are exact.

use crate::types::*;

pub const README_EXISTS_POINTS: u32 = 10;
pub const README_QUALITY_POINTS: u32 = 10;
/// README length (chars) that earns full quality credit.
pub const README_FULL_LENGTH: u64 = 500;
pub const LICENSE_POINTS: u32 = 15;
pub const ISSUES_MANAGEMENT_POINTS: u32 = 15;
/// Flat credit for a repository without any issues.
pub const ISSUES_EMPTY_BACKLOG_POINTS: u32 = 10;
pub const ISSUES_ACTIVITY_POINTS: u32 = 5;
pub const ISSUES_CAP: u32 = 20;
pub const ENGAGEMENT_CAP: u32 = 15;
pub const MAX_SCORE: u32 = 100;

/// Running raw sum plus the breakdown recorded so far.
struct Tally {
  raw: u32,
  breakdown: ScoreBreakdown,
}

impl Tally {
  fn new() -> Self {
    Self {
      raw: 0,
      breakdown: ScoreBreakdown::new(),
    }
  }

  fn add(&mut self, points: u32) {
    self.raw = self.raw.saturating_add(points);
  }

  fn record(&mut self, factor: Factor, points: u32) {
    self.breakdown.insert(factor, points);
  }

  fn record_nonzero(&mut self, factor: Factor, points: u32) {
    if points > 0 {
      self.record(factor, points);
    }
  }
}

/// Score a bundle. Pure and total: any bundle yields a result.
pub fn score(bundle: &RepositoryDataBundle) -> HealthScoreResult {
  let mut tally = Tally::new();

  // README (20)
  if bundle.readme.exists {
    tally.add(README_EXISTS_POINTS);
    tally.record(Factor::ReadmeExists, README_EXISTS_POINTS);
  }
  if let Some(quality) = readme_quality_points(&bundle.readme) {
    tally.add(quality);
    tally.record(Factor::ReadmeQuality, quality);
  }

  // License (15)
  if bundle.license.present {
    tally.add(LICENSE_POINTS);
    tally.record(Factor::License, LICENSE_POINTS);
  }

  // Issues (20)
  let (management, activity) = issue_points(&bundle.issues);
  tally.record(Factor::IssuesManagement, management);
  if let Some(bonus) = activity {
    tally.record(Factor::IssuesActivity, bonus);
  }
  tally.add((management + activity.unwrap_or(0)).min(ISSUES_CAP));

  // Commits (20)
  let commits = commit_points(bundle.commits.count_last_30_days);
  tally.add(commits);
  tally.record_nonzero(Factor::CommitFrequency, commits);

  // Contributors (10)
  let contributors = contributor_points(bundle.contributors.total);
  tally.add(contributors);
  tally.record_nonzero(Factor::Contributors, contributors);

  // Community engagement (15)
  let engagement = engagement_points(&bundle.popularity);
  tally.add(engagement);
  tally.record_nonzero(Factor::CommunityEngagement, engagement);

  HealthScoreResult {
    total: tally.raw.min(MAX_SCORE),
    grade: grade_for(tally.raw),
    breakdown: tally.breakdown,
  }
}

/// `None` when the quality branch does not run (no README and a short body).
pub fn readme_quality_points(readme: &ReadmeSignal) -> Option<u32> {
  if readme.length >= README_FULL_LENGTH {
    Some(README_QUALITY_POINTS)
  } else if readme.exists {
    Some((readme.length * README_QUALITY_POINTS as u64 / README_FULL_LENGTH) as u32)
  } else {
    None
  }
}

/// (management points, activity bonus if earned), both before the combined cap.
pub fn issue_points(issues: &IssueSignal) -> (u32, Option<u32>) {
  let total = issues.open as u128 + issues.closed as u128;
  if total == 0 {
    return (ISSUES_EMPTY_BACKLOG_POINTS, None);
  }
  let management = (issues.closed as u128 * ISSUES_MANAGEMENT_POINTS as u128 / total) as u32;
  let activity = (issues.recent_activity_count > 0).then_some(ISSUES_ACTIVITY_POINTS);
  (management, activity)
}

pub fn commit_points(count: u64) -> u32 {
  match count {
    10.. => 20,
    5..=9 => 15,
    1..=4 => 10,
    0 => 0,
  }
}

pub fn contributor_points(total: u64) -> u32 {
  match total {
    6.. => 10,
    2..=5 => 7,
    1 => 3,
    0 => 0,
  }
}

/// Stars component plus fork-ratio component, capped at 15.
pub fn engagement_points(popularity: &PopularitySignal) -> u32 {
  let stars = match popularity.stars {
    100.. => 7,
    10..=99 => 5,
    1..=9 => 2,
    0 => 0,
  };
  (stars + fork_ratio_points(popularity)).min(ENGAGEMENT_CAP)
}

/// 8 for a fork/star ratio within [0.1, 0.5], 4 for any other positive ratio.
pub fn fork_ratio_points(popularity: &PopularitySignal) -> u32 {
  let stars = popularity.stars as u128;
  let forks = popularity.forks as u128;
  if stars == 0 || forks == 0 {
    return 0;
  }
  if forks * 10 >= stars && forks * 2 <= stars {
    8
  } else {
    4
  }
}

/// Letter grade for a raw (pre-clamp) sum.
pub fn grade_for(raw: u32) -> Grade {
  match raw {
    90.. => Grade::new(GradeLetter::APlus, "Excellent Health"),
    80..=89 => Grade::new(GradeLetter::A, "Great Health"),
    70..=79 => Grade::new(GradeLetter::B, "Good Health"),
    60..=69 => Grade::new(GradeLetter::C, "Fair Health"),
    50..=59 => Grade::new(GradeLetter::D, "Needs Improvement"),
    _ => Grade::new(GradeLetter::F, "Poor Health"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn readme(exists: bool, length: u64) -> ReadmeSignal {
    ReadmeSignal { exists, length }
  }

  fn popularity(stars: u64, forks: u64) -> PopularitySignal {
    PopularitySignal { stars, forks }
  }

  #[test]
  fn readme_quality_partial_credit_floors() {
    assert_eq!(readme_quality_points(&readme(true, 0)), Some(0));
    assert_eq!(readme_quality_points(&readme(true, 49)), Some(0));
    assert_eq!(readme_quality_points(&readme(true, 50)), Some(1));
    assert_eq!(readme_quality_points(&readme(true, 499)), Some(9));
    assert_eq!(readme_quality_points(&readme(true, 500)), Some(10));
    assert_eq!(readme_quality_points(&readme(false, 100)), None);
  }

  #[test]
  fn long_readme_counts_even_without_exists_flag() {
    assert_eq!(readme_quality_points(&readme(false, 800)), Some(10));
  }

  #[test]
  fn readme_threshold_is_inclusive_without_exists_flag() {
    assert_eq!(readme_quality_points(&readme(false, 500)), Some(10));
    assert_eq!(readme_quality_points(&readme(false, 499)), None);

    let mut bundle = RepositoryDataBundle::default();
    bundle.readme = readme(false, 500);
    let result = score(&bundle);
    assert_eq!(result.breakdown.get(&Factor::ReadmeQuality), Some(&10));
    assert!(!result.breakdown.contains_key(&Factor::ReadmeExists));
    assert_eq!(result.total, 20);
  }

  #[test]
  fn issue_management_uses_closed_ratio() {
    let issues = IssueSignal {
      open: 2,
      closed: 8,
      recent_activity_count: 0,
    };
    assert_eq!(issue_points(&issues), (12, None));

    let issues = IssueSignal {
      open: 1,
      closed: 2,
      recent_activity_count: 4,
    };
    assert_eq!(issue_points(&issues), (10, Some(5)));
  }

  #[test]
  fn all_open_issues_score_zero_management() {
    let issues = IssueSignal {
      open: 7,
      closed: 0,
      recent_activity_count: 0,
    };
    assert_eq!(issue_points(&issues), (0, None));
  }

  #[test]
  fn empty_backlog_gets_flat_credit_and_no_bonus() {
    let issues = IssueSignal {
      open: 0,
      closed: 0,
      recent_activity_count: 9,
    };
    assert_eq!(issue_points(&issues), (10, None));
  }

  #[test]
  fn commit_tiers() {
    assert_eq!(commit_points(0), 0);
    assert_eq!(commit_points(1), 10);
    assert_eq!(commit_points(4), 10);
    assert_eq!(commit_points(5), 15);
    assert_eq!(commit_points(9), 15);
    assert_eq!(commit_points(10), 20);
    assert_eq!(commit_points(u64::MAX), 20);
  }

  #[test]
  fn contributor_tiers() {
    assert_eq!(contributor_points(0), 0);
    assert_eq!(contributor_points(1), 3);
    assert_eq!(contributor_points(2), 7);
    assert_eq!(contributor_points(5), 7);
    assert_eq!(contributor_points(6), 10);
  }

  #[test]
  fn fork_ratio_bounds_are_inclusive() {
    assert_eq!(fork_ratio_points(&popularity(100, 10)), 8);
    assert_eq!(fork_ratio_points(&popularity(100, 50)), 8);
    assert_eq!(fork_ratio_points(&popularity(100, 9)), 4);
    assert_eq!(fork_ratio_points(&popularity(100, 51)), 4);
    assert_eq!(fork_ratio_points(&popularity(100, 0)), 0);
    assert_eq!(fork_ratio_points(&popularity(0, 40)), 0);
  }

  #[test]
  fn engagement_is_capped() {
    assert_eq!(engagement_points(&popularity(1000, 500)), 15);
    assert_eq!(engagement_points(&popularity(10, 1)), 13);
    assert_eq!(engagement_points(&popularity(3, 30)), 6);
    assert_eq!(engagement_points(&popularity(0, 0)), 0);
  }

  #[test]
  fn grade_boundaries() {
    let letters: Vec<GradeLetter> = [90, 80, 70, 60, 50, 49]
      .into_iter()
      .map(|raw| grade_for(raw).letter)
      .collect();
    assert_eq!(
      letters,
      vec![
        GradeLetter::APlus,
        GradeLetter::A,
        GradeLetter::B,
        GradeLetter::C,
        GradeLetter::D,
        GradeLetter::F
      ]
    );
    assert_eq!(grade_for(89).description, "Great Health");
    assert_eq!(grade_for(0).description, "Poor Health");
  }

  #[test]
  fn grade_uses_raw_sum_above_max() {
    assert_eq!(grade_for(140).letter, GradeLetter::APlus);
  }

  #[test]
  fn zero_bundle_only_records_empty_backlog_credit() {
    let result = score(&RepositoryDataBundle::default());
    assert_eq!(result.total, 10);
    assert_eq!(result.grade.letter, GradeLetter::F);
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.breakdown.get(&Factor::IssuesManagement), Some(&10));
  }

  #[test]
  fn license_key_only_present_when_earned() {
    let mut bundle = RepositoryDataBundle::default();
    assert!(!score(&bundle).breakdown.contains_key(&Factor::License));
    bundle.license.present = true;
    assert_eq!(score(&bundle).breakdown.get(&Factor::License), Some(&15));
  }

  #[test]
  fn readme_quality_recorded_at_zero_when_readme_exists() {
    let mut bundle = RepositoryDataBundle::default();
    bundle.readme = readme(true, 10);
    let result = score(&bundle);
    assert_eq!(result.breakdown.get(&Factor::ReadmeExists), Some(&10));
    assert_eq!(result.breakdown.get(&Factor::ReadmeQuality), Some(&0));
  }
}
