//! Stub upstream servers shared by the integration tests.

#![allow(dead_code)]

use axum::{
  extract::Query,
  http::{header, HeaderMap, HeaderValue, StatusCode},
  response::IntoResponse,
  routing::{get, post},
  Json, Router,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;

use repo_analyzer::Config;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{}", addr)
}

pub fn config_for(github_base: &str) -> Config {
  Config {
    github_api_base: github_base.to_string(),
    ..Config::default()
  }
}

fn repo_json(name: &str, stars: u64, forks: u64, license: bool) -> Value {
  let license = if license {
    json!({"key": "mit", "name": "MIT License"})
  } else {
    Value::Null
  };
  json!({
    "name": name,
    "full_name": format!("octo/{}", name),
    "description": "A test widget",
    "stargazers_count": stars,
    "forks_count": forks,
    "watchers_count": stars,
    "open_issues_count": 2,
    "language": "Rust",
    "created_at": "2020-01-01T00:00:00Z",
    "updated_at": "2025-01-01T00:00:00Z",
    "pushed_at": "2025-01-01T00:00:00Z",
    "license": license,
    "default_branch": "main",
    "topics": ["cli"]
  })
}

fn commit_json(date: &str) -> Value {
  json!({"sha": "abc", "commit": {"author": {"name": "octo", "date": date}}})
}

fn link_to_last(page: u64) -> HeaderMap {
  let mut headers = HeaderMap::new();
  let link = format!(
    r#"<https://api.github.com/repositories/1/issues?per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/issues?per_page=1&page={}>; rel="last""#,
    page
  );
  headers.insert(header::LINK, HeaderValue::from_str(&link).unwrap());
  headers
}

async fn issues(Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
  let issue = json!({"number": 1, "state": "open"});
  match q.get("state").map(String::as_str) {
    Some("open") => (link_to_last(2), Json(json!([issue]))),
    Some("closed") => (link_to_last(8), Json(json!([issue]))),
    _ => (HeaderMap::new(), Json(json!([issue.clone(), issue.clone(), issue]))),
  }
}

async fn recent_commits() -> Json<Value> {
  let date = (Utc::now() - Duration::minutes(5)).to_rfc3339_opts(SecondsFormat::Secs, true);
  Json(Value::Array((0..12).map(|_| commit_json(&date)).collect()))
}

/// GitHub stub:
/// - `octo/widget`: healthy repository (expected score 97, A+)
/// - `octo/bare`: metadata only, every secondary endpoint 404s
/// - `octo/limited`: 403 on metadata
/// - anything else: 404
pub fn github_stub() -> Router {
  let contributors: Vec<Value> = (0..7)
    .map(|i| json!({"login": format!("dev{}", i), "contributions": 10 - i, "avatar_url": "https://avatars/x"}))
    .collect();

  Router::new()
    .route("/repos/octo/widget", get(|| async { Json(repo_json("widget", 150, 30, true)) }))
    .route("/repos/octo/widget/readme", get(|| async { "# Widget\n".repeat(75) }))
    .route("/repos/octo/widget/commits", get(recent_commits))
    .route(
      "/repos/octo/widget/commits/main",
      get(|| async { Json(commit_json("2025-02-01T12:00:00Z")) }),
    )
    .route(
      "/repos/octo/widget/contributors",
      get(move || async move { Json(Value::Array(contributors)) }),
    )
    .route(
      "/repos/octo/widget/languages",
      get(|| async { Json(json!({"Shell": 100, "Rust": 900})) }),
    )
    .route("/repos/octo/widget/issues", get(issues))
    .route("/repos/octo/bare", get(|| async { Json(repo_json("bare", 0, 0, false)) }))
    .route("/repos/octo/limited", get(|| async { StatusCode::FORBIDDEN }))
}

pub const AI_REPLY: &str = r#"{"summary":"Well maintained.","strengths":["Active commits"],"suggestions":[{"priority":"Low","category":"Testing","title":"Add CI","description":"Run tests on every push."}]}"#;

/// OpenAI-compatible stub answering every chat completion with `AI_REPLY`.
pub fn openai_stub() -> Router {
  Router::new().route(
    "/chat/completions",
    post(|Json(body): Json<Value>| async move {
      assert_eq!(body["response_format"]["type"], "json_object");
      Json(json!({"choices": [{"message": {"role": "assistant", "content": AI_REPLY}}]}))
    }),
  )
}

/// Gemini stub replying with `AI_REPLY` wrapped in a fenced block.
pub fn gemini_stub() -> Router {
  Router::new().fallback(|| async {
    let text = format!("```json\n{}\n```", AI_REPLY);
    Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
  })
}

/// Provider stub that always fails.
pub fn failing_stub() -> Router {
  Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") })
}
