//! Date parsing and commit-activity bucketing.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::HashMap;

use crate::github::types::DailyCommits;

/// Length of the commit-activity window, in days.
pub const ACTIVITY_WINDOW_DAYS: u64 = 30;

/// Parse an ISO8601 timestamp to its UTC calendar day.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
  let dt = DateTime::parse_from_rfc3339(s).ok()?.with_timezone(&Utc);
  Some(dt.date_naive())
}

/// One entry per day for the window ending at `today` (oldest first), with the
/// number of timestamps that fall on each day. Unparseable timestamps are skipped.
pub fn daily_commit_chart<'a, I>(timestamps: I, today: NaiveDate) -> Vec<DailyCommits>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
  for ts in timestamps {
    if let Some(day) = parse_day(ts) {
      *per_day.entry(day).or_insert(0) += 1;
    }
  }

  (0..ACTIVITY_WINDOW_DAYS)
    .rev()
    .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
    .map(|day| DailyCommits {
      date: day.format("%Y-%m-%d").to_string(),
      commits: per_day.get(&day).copied().unwrap_or(0),
    })
    .collect()
}
