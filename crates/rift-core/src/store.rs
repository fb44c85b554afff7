//! The `CrawlStore` trait: the durable frontier plus the fact sinks.
//!
//! The trait is implemented by storage backends (e.g. `rift-store-sqlite`).
//! The crawler and the reference loader depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  champion::Champion,
  fact::{MasteryFact, MatchCommit, MatchHarvest, Participation},
  id::{ChampionId, MatchId, Puuid},
};

/// Abstraction over the crawl's relational store.
///
/// The queue is a set: a match id is pending at most once, and enqueueing an
/// id that is pending or was already committed is a no-op.
pub trait CrawlStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Queue ─────────────────────────────────────────────────────────────

  /// Insert every id that is neither pending nor committed. Returns how many
  /// were new.
  fn enqueue_many(
    &self,
    ids: Vec<MatchId>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Up to `n` pending ids chosen uniformly at random. Nothing is removed;
  /// an empty queue yields an empty vector.
  fn dequeue_random_batch(
    &self,
    n: usize,
  ) -> impl Future<Output = Result<Vec<MatchId>, Self::Error>> + Send + '_;

  /// Drop an id from the queue without marking it committed. Returns
  /// `false` if it was not pending.
  fn remove<'a>(
    &'a self,
    id: &'a MatchId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn pending_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Facts ─────────────────────────────────────────────────────────────

  /// Append participation rows. Never deduplicates.
  fn append_participations(
    &self,
    rows: Vec<Participation>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Insert a mastery fact unless the (player, champion) pair already has
  /// one. Returns whether a row was written.
  fn insert_mastery(
    &self,
    fact: MasteryFact,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Apply a whole harvest atomically: append its participations, insert
  /// its masteries if absent, mark its match committed, remove it from the
  /// queue and enqueue its discovered ids. Either all of it lands or none of
  /// it does.
  fn commit_match(
    &self,
    harvest: MatchHarvest,
  ) -> impl Future<Output = Result<MatchCommit, Self::Error>> + Send + '_;

  // ── Reference data ────────────────────────────────────────────────────

  /// Replace the whole champion dimension with `champions`.
  fn replace_champions(
    &self,
    champions: Vec<Champion>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn participations_for<'a>(
    &'a self,
    match_id: &'a MatchId,
  ) -> impl Future<Output = Result<Vec<Participation>, Self::Error>> + Send + 'a;

  fn mastery<'a>(
    &'a self,
    puuid: &'a Puuid,
    champion_id: ChampionId,
  ) -> impl Future<Output = Result<Option<MasteryFact>, Self::Error>> + Send + 'a;

  fn champion_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
