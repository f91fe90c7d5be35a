//! Analysis prompt built from the collected data and the computed score.

use health_engine::HealthScoreResult;

use crate::github::RepoData;

pub fn build_prompt(data: &RepoData, score: &HealthScoreResult) -> String {
  let info = &data.info;
  let or_unknown = |v: &str| if v.is_empty() { "Unknown".to_string() } else { v.to_string() };

  let license = match (info.has_license, &info.license) {
    (true, Some(name)) => format!("Yes ({})", name),
    (true, None) => "Yes".to_string(),
    (false, _) => "No".to_string(),
  };
  let readme = if data.readme.exists {
    format!("Yes ({} chars)", data.readme.length)
  } else {
    "No".to_string()
  };
  let preview = if data.readme.content.is_empty() {
    "No README available"
  } else {
    data.readme.content.as_str()
  };

  format!(
    r#"You are an expert code repository analyst. Analyze this GitHub repository and provide specific, actionable insights.

REPOSITORY DETAILS:
- Name: {name}
- Description: {description}
- Primary Language: {language}
- Stars: {stars} | Forks: {forks} | Watchers: {watchers}
- Open Issues: {open} | Closed Issues: {closed}
- Contributors: {contributors}
- Commits (last 30 days): {commits}
- Has License: {license}
- Has README: {readme}
- Last Updated: {pushed}

HEALTH SCORE: {total}/100 ({grade})

README PREVIEW:
{preview}

TASK:
Respond with JSON only, using this structure:
{{
  "summary": "2-3 sentences on the repository's overall health and purpose",
  "strengths": ["what the repository does well", "..."],
  "suggestions": [
    {{
      "priority": "High|Medium|Low",
      "category": "Documentation|Maintenance|Community|Testing|Security|Quality",
      "title": "Short title",
      "description": "The problem and concrete steps to fix it"
    }}
  ]
}}

Guidelines:
- 3-5 strengths grounded in the data above
- 4-6 prioritized, specific, actionable suggestions, highest impact first
- Consider activity level, community engagement, documentation and quality signals
- Output must be valid JSON"#,
    name = or_unknown(&info.full_name),
    description = info.description.as_deref().unwrap_or("No description"),
    language = or_unknown(&data.languages.primary),
    stars = info.stars,
    forks = info.forks,
    watchers = info.watchers,
    open = data.issues.open,
    closed = data.issues.closed,
    contributors = data.contributors.total,
    commits = data.commits.total_commits,
    license = license,
    readme = readme,
    pushed = info.pushed_at.as_deref().unwrap_or("Unknown"),
    total = score.total,
    grade = score.grade.description,
    preview = preview,
  )
}
