//! grocer-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite document store, loads the initial catalogue into an empty store,
//! and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use grocer_core::seed::{self, SeedReport};
use grocer_server::ServerConfig;
use grocer_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Grocer catalogue server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Do not load the initial catalogue, even into an empty store.
  #[arg(long)]
  skip_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.should_seed(cli.skip_seed) {
    match seed::seed_if_empty(&store)
      .await
      .context("failed to seed store")?
    {
      SeedReport::Loaded { categories, vendors } => {
        tracing::info!(categories, vendors, "seeded empty store");
      }
      SeedReport::Skipped { categories } => {
        tracing::info!(categories, "store already populated");
      }
    }
  }

  let app = grocer_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
