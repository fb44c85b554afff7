//! Crawler binary.
//!
//! Reads `rift.toml` (or the path given with `--config`), opens the SQLite
//! store and crawls until Ctrl-C, the iteration limit, or an exhausted
//! frontier.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rift_crawler::{Config, Crawler, telemetry};
use rift_riot::RiotClient;
use rift_store_sqlite::SqliteStore;
use tokio::sync::watch;

#[derive(Parser)]
#[command(author, version, about = "Crawl ranked matches into the Rift store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rift.toml")]
  config: PathBuf,

  /// Process a single batch and exit.
  #[arg(long, conflicts_with = "iterations")]
  once: bool,

  /// Stop after this many batches.
  #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
  iterations: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init();

  let cli = Cli::parse();

  let mut cfg = Config::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;
  cfg.require_api_key()?;
  if cli.once {
    cfg.crawl.max_iterations = Some(1);
  } else if cli.iterations.is_some() {
    cfg.crawl.max_iterations = cli.iterations;
  }

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let api = RiotClient::new(cfg.riot.clone()).context("failed to build Riot client")?;

  let (stop_tx, stop_rx) = watch::channel(false);
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::info!("Ctrl-C received; finishing the current match");
      let _ = stop_tx.send(true);
    }
  });

  let crawler = Crawler::new(api, store, cfg.crawl);
  let report = crawler.run(stop_rx).await.context("crawl failed")?;

  tracing::info!(
    processed = report.matches_processed,
    failed = report.matches_failed,
    "Exiting"
  );
  Ok(())
}
