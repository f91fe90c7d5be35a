//! Repository Analyzer Service
//!
//! HTTP API that collects GitHub signals for a public repository, scores them
//! with the health engine, and optionally asks an LLM for improvement insights.

mod aggregate;
mod date;
mod handlers;
mod state;

pub mod config;
pub mod error;
pub mod github;
pub mod insights;
pub mod types;
pub mod url;

use axum::{
  http::{header, HeaderValue, Method},
  routing::{get, post},
  Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

pub use aggregate::collect;
pub use config::Config;
pub use error::{ApiError, AppError};
pub use handlers::{analyze_repo, generate_ai_insights, health};
pub use state::AppState;

/// Build the API router with CORS applied.
pub fn router(state: Arc<AppState>) -> Router {
  let cors = cors_layer(state.config.cors_origin.as_deref());
  Router::new()
    .route("/api/health", get(health))
    .route("/api/analyze-repo", post(analyze_repo))
    .route("/api/generate-ai-insights", post(generate_ai_insights))
    .layer(cors)
    .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
  let Some(origin) = origin else {
    return CorsLayer::permissive();
  };
  match origin.parse::<HeaderValue>() {
    Ok(value) => CorsLayer::new()
      .allow_origin(value)
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
      .allow_credentials(true),
    Err(_) => {
      warn!(origin, "invalid CORS_ORIGIN, allowing any origin");
      CorsLayer::permissive()
    }
  }
}
