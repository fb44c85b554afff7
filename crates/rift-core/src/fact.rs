//! Fact rows produced by the crawl.
//!
//! Participation facts are append-only. Mastery facts are insert-if-absent:
//! the first observation for a (player, champion) pair wins and later ones are
//! dropped.

use serde::{Deserialize, Serialize};

use crate::id::{ChampionId, MatchId, Puuid};

/// One player's role and outcome within one match (a `fct_matches` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
  pub match_id:      MatchId,
  pub puuid:         Puuid,
  pub champion_id:   ChampionId,
  /// `TOP`, `JUNGLE`, `MIDDLE`, `BOTTOM`, `UTILITY`, or empty for remakes.
  pub team_position: String,
  pub win:           bool,
}

/// A player's cumulative mastery points on one champion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryFact {
  pub puuid:           Puuid,
  pub champion_id:     ChampionId,
  pub champion_points: i64,
}

// ─── Harvest ─────────────────────────────────────────────────────────────────

/// Everything gathered upstream for one match, committed as a unit by
/// [`crate::store::CrawlStore::commit_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHarvest {
  pub match_id:       MatchId,
  pub participations: Vec<Participation>,
  pub masteries:      Vec<MasteryFact>,
  /// Match ids found in the participants' histories; may repeat or already
  /// be known to the store.
  pub discovered:     Vec<MatchId>,
}

impl MatchHarvest {
  pub fn new(match_id: MatchId) -> Self {
    Self {
      match_id,
      participations: Vec::new(),
      masteries: Vec::new(),
      discovered: Vec::new(),
    }
  }

  /// Distinct participants in first-seen order, each paired with the
  /// champion they played in this match.
  pub fn players(&self) -> Vec<(Puuid, ChampionId)> {
    let mut seen = std::collections::HashSet::new();
    self
      .participations
      .iter()
      .filter(|p| seen.insert(p.puuid.clone()))
      .map(|p| (p.puuid.clone(), p.champion_id))
      .collect()
  }
}

/// Row counts from committing a [`MatchHarvest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCommit {
  pub participations: usize,
  /// Mastery rows actually written; pairs already present are not counted.
  pub masteries:      usize,
  /// Identifiers newly added to the queue.
  pub enqueued:       usize,
  /// Whether the match id was still pending when it was removed.
  pub removed:        bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn participation(puuid: &str, champion: i64) -> Participation {
    Participation {
      match_id:      MatchId::new("NA1_1").unwrap(),
      puuid:         Puuid::new(puuid).unwrap(),
      champion_id:   ChampionId(champion),
      team_position: "TOP".into(),
      win:           true,
    }
  }

  #[test]
  fn players_are_distinct_in_first_seen_order() {
    let mut harvest = MatchHarvest::new(MatchId::new("NA1_1").unwrap());
    harvest.participations = vec![
      participation("b", 1),
      participation("a", 2),
      participation("b", 3),
    ];

    let players = harvest.players();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0], (Puuid::new("b").unwrap(), ChampionId(1)));
    assert_eq!(players[1], (Puuid::new("a").unwrap(), ChampionId(2)));
  }
}
