//! Client configuration, deserialised from the `[riot]` table of the crawler
//! config.

use chrono::{DateTime, TimeZone as _, Utc};
use serde::Deserialize;

/// Connection settings for the Riot API.
#[derive(Debug, Clone, Deserialize)]
pub struct RiotConfig {
  /// Sent as `X-Riot-Token` on every request.
  #[serde(default)]
  pub api_key:              String,
  /// Regional routing host for the match endpoints.
  #[serde(default = "default_regional_url")]
  pub regional_url:         String,
  /// Platform host for the summoner and mastery endpoints.
  #[serde(default = "default_platform_url")]
  pub platform_url:         String,
  /// Data Dragon `champion.json` for the reference-data loader.
  #[serde(default = "default_ddragon_url")]
  pub ddragon_url:          String,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
  #[serde(default)]
  pub match_window:         MatchWindow,
}

/// Which slice of a player's history the match-id lookup asks for.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchWindow {
  #[serde(default = "default_window_start")]
  pub start:      DateTime<Utc>,
  #[serde(default = "default_window_end")]
  pub end:        DateTime<Utc>,
  #[serde(default = "default_queue_type")]
  pub queue_type: String,
  /// Upstream caps this at 100.
  #[serde(default = "default_match_count")]
  pub count:      u32,
}

impl RiotConfig {
  /// Defaults for everything except the key.
  pub fn with_api_key(api_key: impl Into<String>) -> Self {
    Self { api_key: api_key.into(), ..Self::default() }
  }
}

impl Default for RiotConfig {
  fn default() -> Self {
    Self {
      api_key:              String::new(),
      regional_url:         default_regional_url(),
      platform_url:         default_platform_url(),
      ddragon_url:          default_ddragon_url(),
      request_timeout_secs: default_request_timeout_secs(),
      match_window:         MatchWindow::default(),
    }
  }
}

impl Default for MatchWindow {
  fn default() -> Self {
    Self {
      start:      default_window_start(),
      end:        default_window_end(),
      queue_type: default_queue_type(),
      count:      default_match_count(),
    }
  }
}

fn default_regional_url() -> String { "https://americas.api.riotgames.com".into() }

fn default_platform_url() -> String { "https://na1.api.riotgames.com".into() }

fn default_ddragon_url() -> String {
  "https://ddragon.leagueoflegends.com/cdn/13.22.1/data/en_US/champion.json".into()
}

fn default_request_timeout_secs() -> u64 { 30 }

fn default_window_start() -> DateTime<Utc> {
  Utc.timestamp_opt(1_696_888_052, 0).single().unwrap_or_default()
}

fn default_window_end() -> DateTime<Utc> {
  Utc.timestamp_opt(1_699_570_052, 0).single().unwrap_or_default()
}

fn default_queue_type() -> String { "ranked".into() }

fn default_match_count() -> u32 { 100 }
