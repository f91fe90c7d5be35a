//! Binary entrypoint for the repository analyzer service.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use repo_analyzer::{AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env()?;
  let addr = SocketAddr::new(config.host, config.port);
  info!(
    github_token = config.github_token.is_some(),
    openai = config.openai_api_key.is_some(),
    gemini = config.gemini_api_key.is_some(),
    "configuration loaded"
  );

  let state = Arc::new(AppState::new(config)?);
  let app = repo_analyzer::router(state);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("repo-analyzer listening on http://{}", addr);
  info!("health check: http://{}/api/health", addr);
  axum::serve(listener, app).await?;

  Ok(())
}
