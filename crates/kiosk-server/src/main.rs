//! kiosk-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `KIOSK__*` environment variables, opens the SQLite store, and serves the
//! kiosk API over HTTP.
//!
//! `session.secret` has no default; set it in the file or via
//! `KIOSK__SESSION__SECRET`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use kiosk_server::{AppState, ServerConfig};
use kiosk_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Campus kiosk backend")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("KIOSK")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("languages.targets")
        .try_parsing(true),
    )
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  anyhow::ensure!(
    !server_cfg.session.secret.trim().is_empty(),
    "session.secret must be set"
  );

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!(
    source = %server_cfg.languages.source,
    targets = ?server_cfg.languages.targets,
    "content languages"
  );

  let state = AppState::new(Arc::new(store), server_cfg)
    .context("failed to build translation client")?;
  let app = kiosk_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
