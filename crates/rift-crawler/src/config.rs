//! Process configuration.
//!
//! Sources, later ones winning:
//!
//! 1. the TOML file given with `--config` (optional),
//! 2. `RIFT__*` environment variables, `__` separating nesting levels
//!    (e.g. `RIFT__CRAWL__BATCH_SIZE=2`),
//! 3. `RIOT_API_KEY`, which overrides `riot.api_key`.
//!
//! ```toml
//! store_path = "rift.db"
//!
//! [riot]
//! api_key = "RGAPI-..."
//!
//! [riot.match_window]
//! start = "2023-10-09T21:47:32Z"
//! end   = "2023-11-09T22:47:32Z"
//!
//! [crawl]
//! root_players         = ["4l3c4", "Riot GalaxySmash", "weirdosuper2"]
//! batch_size           = 4
//! iteration_floor_secs = 120
//! ```

use std::path::{Path, PathBuf};

use rift_riot::RiotConfig;
use serde::Deserialize;

use crate::{CrawlSettings, Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub riot:       RiotConfig,
  #[serde(default)]
  pub crawl:      CrawlSettings,
}

impl Config {
  /// Load and validate configuration from `path` and the environment.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(path.to_path_buf()).required(false))
      .add_source(::config::Environment::with_prefix("RIFT").separator("__"))
      .set_override_option("riot.api_key", std::env::var("RIOT_API_KEY").ok())?
      .build()?;

    let cfg: Self = settings.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> Result<()> {
    if self.crawl.batch_size == 0 {
      return Err(Error::Invalid("crawl.batch_size must be at least 1".into()));
    }
    if self.crawl.max_iterations == Some(0) {
      return Err(Error::Invalid("crawl.max_iterations must be at least 1".into()));
    }
    if !(1..=100).contains(&self.riot.match_window.count) {
      return Err(Error::Invalid(
        "riot.match_window.count must be between 1 and 100".into(),
      ));
    }
    if self.riot.match_window.end <= self.riot.match_window.start {
      return Err(Error::Invalid(
        "riot.match_window.end must be after riot.match_window.start".into(),
      ));
    }
    Ok(())
  }

  /// The crawler cannot reach the match endpoints without a key; the
  /// reference loader can.
  pub fn require_api_key(&self) -> Result<()> {
    if self.riot.api_key.trim().is_empty() {
      return Err(Error::Invalid(
        "no API key: set RIOT_API_KEY or riot.api_key".into(),
      ));
    }
    Ok(())
  }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

fn default_store_path() -> PathBuf { PathBuf::from("rift.db") }
