//! The `RiotApi` trait: the upstream calls the crawl loop depends on.
//!
//! Implemented over HTTP by `rift-riot`. The crawler is generic over this
//! trait so it can be driven by an in-process fake in tests.

use std::future::Future;

use crate::{
  fact::{MasteryFact, Participation},
  id::{ChampionId, MatchId, Puuid},
};

/// Read-only access to the match, mastery and summoner endpoints.
///
/// No method retries; every failure is returned to the caller.
pub trait RiotApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Recent match ids for a player within the configured time window and
  /// queue type, in upstream (most-recent-first) order.
  fn match_ids_by_puuid<'a>(
    &'a self,
    puuid: &'a Puuid,
  ) -> impl Future<Output = Result<Vec<MatchId>, Self::Error>> + Send + 'a;

  /// One participation row per participant of the match.
  fn match_participants<'a>(
    &'a self,
    match_id: &'a MatchId,
  ) -> impl Future<Output = Result<Vec<Participation>, Self::Error>> + Send + 'a;

  /// Mastery points for a player on one champion. Upstream answers 404 for
  /// a champion the player has never played, which is an error like any
  /// other non-2xx.
  fn champion_mastery<'a>(
    &'a self,
    puuid: &'a Puuid,
    champion_id: ChampionId,
  ) -> impl Future<Output = Result<MasteryFact, Self::Error>> + Send + 'a;

  /// Resolve a summoner name to its PUUID. Only used for seeding.
  fn puuid_by_summoner_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Puuid, Self::Error>> + Send + 'a;
}
