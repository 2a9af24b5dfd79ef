//! HTTP front for the casefile intake service.
//!
//! Assembles the public router — health probe, static intake pages, the
//! JSON API under `/api`, frontend assets under `/assets` — over any
//! [`CaseStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  routing::get,
};
use casefile_api::ApiState;
use casefile_core::store::CaseStore;
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CASEFILE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// SQLite database path. Uploaded files land in an `uploads/` directory
  /// next to it.
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  /// Directory holding `index.html`, `precheck.html`, and static assets.
  #[serde(default = "default_frontend_dir")]
  pub frontend_dir: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("casefile.db") }
fn default_frontend_dir() -> PathBuf { PathBuf::from("frontend") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      store_path:   default_store_path(),
      frontend_dir: default_frontend_dir(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the public router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api_state = ApiState {
    store,
    upload_dir: config
      .store_path
      .parent()
      .unwrap_or(Path::new("."))
      .join("uploads"),
  };

  let frontend = config.frontend_dir.clone();
  let index_dir = frontend.clone();
  let precheck_dir = frontend.clone();

  Router::new()
    .route("/healthz", get(healthz))
    .route("/", get(move || index(index_dir)))
    .route("/precheck", get(move || precheck(precheck_dir)))
    .nest("/api", casefile_api::api_router(api_state))
    .nest_service("/assets", ServeDir::new(frontend))
    .layer(CorsLayer::permissive())
}

// ─── Page handlers ───────────────────────────────────────────────────────────

/// `GET /healthz` — liveness only; deliberately ignores the database.
async fn healthz() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok" }))
}

/// `GET /` — the intake page, falling back to the precheck page, falling
/// back to JSON so a bare deployment still answers.
async fn index(dir: PathBuf) -> Response {
  for page in ["index.html", "precheck.html"] {
    if let Ok(body) = tokio::fs::read_to_string(dir.join(page)).await {
      return Html(body).into_response();
    }
  }
  Json(json!({
    "message": "casefile intake API is running; no frontend is installed"
  }))
  .into_response()
}

/// `GET /precheck`
async fn precheck(dir: PathBuf) -> Response {
  match tokio::fs::read_to_string(dir.join("precheck.html")).await {
    Ok(body) => Html(body).into_response(),
    Err(_) => (
      StatusCode::NOT_FOUND,
      Json(json!({ "message": "precheck page not installed" })),
    )
      .into_response(),
  }
}

// ─── Integration tests ───────────────────────────────────────────────────────
