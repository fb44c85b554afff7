//! Conversions between domain types and the plain column values stored in
//! SQLite.
//!
//! Identifiers are stored as their raw upstream strings, champion ids as
//! integers, win flags as 0/1 and champion tags as a compact JSON array.

use rift_core::{
  fact::{MasteryFact, Participation},
  id::{ChampionId, MatchId, Puuid},
};

use crate::{Error, Result};

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn decode_count(n: i64, column: &'static str) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::OutOfRange(column))
}

pub fn encode_limit(n: usize) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `fct_matches` row exactly as read from SQLite.
pub struct RawParticipation {
  pub matchid:      String,
  pub puuid:        String,
  pub championid:   i64,
  pub teamposition: String,
  pub win:          bool,
}

impl RawParticipation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      matchid:      row.get(0)?,
      puuid:        row.get(1)?,
      championid:   row.get(2)?,
      teamposition: row.get(3)?,
      win:          row.get(4)?,
    })
  }

  pub fn into_participation(self) -> Result<Participation> {
    Ok(Participation {
      match_id:      MatchId::new(self.matchid)?,
      puuid:         Puuid::new(self.puuid)?,
      champion_id:   ChampionId(self.championid),
      team_position: self.teamposition,
      win:           self.win,
    })
  }
}

/// A `dim_champion_mastery` row exactly as read from SQLite.
pub struct RawMastery {
  pub puuid:          String,
  pub championid:     i64,
  pub championpoints: i64,
}

impl RawMastery {
  pub fn into_fact(self) -> Result<MasteryFact> {
    Ok(MasteryFact {
      puuid:           Puuid::new(self.puuid)?,
      champion_id:     ChampionId(self.championid),
      champion_points: self.championpoints,
    })
  }
}
