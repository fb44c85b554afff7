//! Champion reference data (the `dim_champions` dimension).
//!
//! Loaded once from Data Dragon and replaced wholesale on every load; the
//! crawl loop never reads or writes it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::ChampionId;

/// The four 0–10 ratings from the Data Dragon `info` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionInfo {
  pub attack:     i64,
  pub defense:    i64,
  pub magic:      i64,
  pub difficulty: i64,
}

/// One flattened champion row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
  pub champion_id: ChampionId,
  /// Data Dragon string id, e.g. `"MonkeyKing"`.
  pub id:          String,
  pub name:        String,
  pub title:       String,
  pub blurb:       String,
  /// Resource bar type (`"Mana"`, `"Energy"`, ...).
  pub partype:     String,
  pub tags:        Vec<String>,
  pub version:     String,
  pub info:        ChampionInfo,
  /// Base stats keyed by Data Dragon stat name (`hp`, `armorperlevel`, ...).
  pub stats:       BTreeMap<String, f64>,
}
