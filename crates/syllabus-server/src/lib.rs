//! HTTP server wiring for Syllabus.
//!
//! Loads [`ServerConfig`], builds the top-level [`Router`] (JSON API under
//! `/api`, a liveness probe at `/healthz`), and wraps it in request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use serde::Deserialize;
use syllabus_core::{parser::ContentParser, store::ContentStore};
use syllabus_store_sqlite::DEFAULT_WRITE_CHUNK_SIZE;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SYLLABUS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  /// Records per `INSERT` statement during an ingest.
  #[serde(default = "default_write_chunk_size")]
  pub write_chunk_size: usize,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("syllabus.db") }

fn default_write_chunk_size() -> usize { DEFAULT_WRITE_CHUNK_SIZE }

/// Layer the TOML file at `path` (optional) under `SYLLABUS_*` environment
/// variables and deserialise the result.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("SYLLABUS").try_parsing(true))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level [`Router`] for the server.
pub fn router<S, P>(store: Arc<S>, parser: Arc<P>) -> Router
where
  S: ContentStore + 'static,
  P: ContentParser + 'static,
{
  Router::new()
    .route("/healthz", get(|| async { "ok" }))
    .nest("/api", syllabus_api::api_router(store, parser))
    .layer(TraceLayer::new_for_http())
}
