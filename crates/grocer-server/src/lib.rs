//! Grocer HTTP server: configuration and the top-level router.
//!
//! The binary in `main.rs` wires these together with a
//! [`SqliteStore`](grocer_store_sqlite::SqliteStore).

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use config::{ConfigBuilder, builder::DefaultState};
use grocer_core::{Category, EntityStore, Vendor};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Environment variables with this prefix override file settings,
/// e.g. `GROCER_PORT=9000`.
pub const ENV_PREFIX: &str = "GROCER";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration: defaults, then `config.toml`, then the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Load the fixed catalogue into an empty store at startup.
  pub seed:       bool,
}

impl ServerConfig {
  /// Read configuration from `path` (optional) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_sources(path, config::Environment::with_prefix(ENV_PREFIX))
  }

  fn from_sources(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080_i64)?
      .set_default("store_path", "grocer.db")?
      .set_default("seed", true)?
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// Whether startup seeding runs; `--skip-seed` wins over `seed = true`.
  pub fn should_seed(&self, skip_seed: bool) -> bool { self.seed && !skip_seed }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: EntityStore<Category> + EntityStore<Vendor> + 'static,
{
  grocer_api::api_router(store).layer(TraceLayer::new_for_http())
}
