//! Reference-data loader.
//!
//! Downloads the champion file for the configured Data Dragon version and
//! replaces the champion tables with its contents. Needs no API key.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rift_core::store::CrawlStore;
use rift_crawler::{Config, telemetry};
use rift_riot::RiotClient;
use rift_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Load champion reference data into the Rift store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rift.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init();

  let cli = Cli::parse();
  let cfg = Config::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let api = RiotClient::new(cfg.riot.clone()).context("failed to build Riot client")?;

  tracing::info!(url = %cfg.riot.ddragon_url, "Fetching champion data");
  let champions = api
    .champions()
    .await
    .context("failed to fetch champion data")?;

  let loaded = store
    .replace_champions(champions)
    .await
    .context("failed to write champion data")?;
  tracing::info!(champions = loaded, "Champion data loaded");
  Ok(())
}
