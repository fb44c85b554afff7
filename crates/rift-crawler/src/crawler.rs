//! The crawl loop.
//!
//! States and transitions:
//!
//! - start: `Seeding` if the queue is empty, otherwise `Draining`.
//! - `Seeding` → `Draining`, or `Done` when seeding finds nothing new or
//!   the batch limit is already reached.
//! - `Draining` → `IdleSleep` after processing one match; draws a new batch
//!   when the current one is used up; `Seeding` if the draw is empty; `Done`
//!   on shutdown or once `max_iterations` batches have been drawn.
//! - `IdleSleep` → `Draining`, or `Done` if shutdown arrives while sleeping.
//!
//! One match is processed per `Draining` step; every drawn match is processed
//! before the next batch is drawn. Each match issues up to
//! `1 + 2 × participants` requests, so the loop sleeps until
//! `iteration_floor` has passed since the match started.
//!
//! A failed match stays queued and may be drawn again, each attempt costing
//! a full pacing slot. Repeat failures are logged with their attempt count.

use std::{
  collections::{HashMap, VecDeque},
  fmt,
  time::Duration,
};

use serde::Deserialize;
use tokio::{sync::watch, time::Instant};

use rift_core::{
  api::RiotApi,
  fact::{MatchCommit, MatchHarvest},
  id::MatchId,
  store::CrawlStore,
};

use crate::{Error, Result};

// ─── Settings ────────────────────────────────────────────────────────────────

/// Crawl-loop tuning, deserialised from the `[crawl]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
  /// Summoner names used to bootstrap an empty frontier.
  #[serde(default = "default_root_players")]
  pub root_players:         Vec<String>,
  #[serde(default = "default_batch_size")]
  pub batch_size:           usize,
  /// Minimum wall-clock time per processed match.
  #[serde(default = "default_iteration_floor_secs")]
  pub iteration_floor_secs: u64,
  /// Stop after this many batches. `None` runs until shutdown.
  #[serde(default)]
  pub max_iterations:       Option<u64>,
}

impl CrawlSettings {
  pub fn iteration_floor(&self) -> Duration {
    Duration::from_secs(self.iteration_floor_secs)
  }
}

impl Default for CrawlSettings {
  fn default() -> Self {
    Self {
      root_players:         default_root_players(),
      batch_size:           default_batch_size(),
      iteration_floor_secs: default_iteration_floor_secs(),
      max_iterations:       None,
    }
  }
}

fn default_root_players() -> Vec<String> {
  vec!["4l3c4".into(), "Riot GalaxySmash".into(), "weirdosuper2".into()]
}

fn default_batch_size() -> usize { 4 }

fn default_iteration_floor_secs() -> u64 { 120 }

// ─── State / report ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
  Seeding,
  Draining,
  IdleSleep,
  Done,
}

impl fmt::Display for CrawlState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Seeding => "seeding",
      Self::Draining => "draining",
      Self::IdleSleep => "idle-sleep",
      Self::Done => "done",
    })
  }
}

/// Counters accumulated over one [`Crawler::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
  /// Identifiers added to the queue by seeding.
  pub seeded:            usize,
  pub batches:           u64,
  pub matches_processed: u64,
  /// Matches abandoned after an upstream error; they stay pending.
  pub matches_failed:    u64,
  /// Failures of a match that had already failed earlier in the run.
  pub retries:           u64,
  pub participations:    usize,
  pub masteries:         usize,
  /// Identifiers added to the queue by draining.
  pub enqueued:          usize,
}

impl CrawlReport {
  fn record(&mut self, commit: &MatchCommit) {
    self.matches_processed += 1;
    self.participations += commit.participations;
    self.masteries += commit.masteries;
    self.enqueued += commit.enqueued;
  }
}

// ─── Crawler ─────────────────────────────────────────────────────────────────

/// Single-worker crawler over any [`RiotApi`] and [`CrawlStore`].
pub struct Crawler<A, S> {
  api:      A,
  store:    S,
  settings: CrawlSettings,
}

impl<A, S> Crawler<A, S>
where
  A: RiotApi,
  S: CrawlStore,
{
  pub fn new(api: A, store: S, settings: CrawlSettings) -> Self {
    Self { api, store, settings }
  }

  pub fn api(&self) -> &A { &self.api }

  pub fn store(&self) -> &S { &self.store }

  pub fn settings(&self) -> &CrawlSettings { &self.settings }

  /// Resolve every root player and enqueue their recent matches. Returns
  /// how many identifiers were new to the queue.
  pub async fn seed(&self) -> Result<usize> {
    let mut added = 0;
    for name in &self.settings.root_players {
      let puuid = self
        .api
        .puuid_by_summoner_name(name)
        .await
        .map_err(Error::upstream)?;
      let ids = self
        .api
        .match_ids_by_puuid(&puuid)
        .await
        .map_err(Error::upstream)?;
      tracing::info!(root = %name, matches = ids.len(), "Fetched root player history");
      added += self.store.enqueue_many(ids).await.map_err(Error::store)?;
    }
    Ok(added)
  }

  /// Gather everything for one match without touching the store.
  pub async fn harvest(&self, match_id: &MatchId) -> Result<MatchHarvest, A::Error> {
    let mut harvest = MatchHarvest::new(match_id.clone());
    harvest.participations = self.api.match_participants(match_id).await?;
    let players = harvest.players();

    for (puuid, champion_id) in &players {
      harvest
        .masteries
        .push(self.api.champion_mastery(puuid, *champion_id).await?);
    }

    for (puuid, _) in &players {
      let ids = self.api.match_ids_by_puuid(puuid).await?;
      tracing::debug!(%puuid, matches = ids.len(), "Fetched player history");
      harvest.discovered.extend(ids);
    }

    Ok(harvest)
  }

  /// Harvest and commit one match. An upstream failure leaves the match
  /// pending and returns `Ok(None)`; store failures are returned as errors.
  pub async fn process_match(&self, match_id: &MatchId) -> Result<Option<MatchCommit>> {
    tracing::info!(%match_id, "Processing match");

    let harvest = match self.harvest(match_id).await {
      Ok(h) => h,
      Err(e) => {
        tracing::warn!(%match_id, error = %e, "Match abandoned; it stays queued");
        return Ok(None);
      }
    };

    let commit = self.store.commit_match(harvest).await.map_err(Error::store)?;
    tracing::info!(
      %match_id,
      participations = commit.participations,
      masteries = commit.masteries,
      enqueued = commit.enqueued,
      "Committed match"
    );
    Ok(Some(commit))
  }

  /// Run until the shutdown flag flips to `true`, the iteration limit is
  /// reached, or there is nothing left to crawl.
  pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<CrawlReport> {
    let mut report = CrawlReport::default();
    let mut batch: VecDeque<MatchId> = VecDeque::new();
    let mut attempts: HashMap<MatchId, u64> = HashMap::new();
    let mut started = Instant::now();

    let pending = self.store.pending_count().await.map_err(Error::store)?;
    tracing::info!(pending, "Matches in queue");
    let mut state = if pending == 0 {
      CrawlState::Seeding
    } else {
      CrawlState::Draining
    };

    loop {
      tracing::debug!(%state, "Crawl state");
      state = match state {
        CrawlState::Seeding if self.limit_reached(report.batches) => CrawlState::Done,

        CrawlState::Seeding => {
          tracing::info!("Match queue empty; regenerating from root players");
          let added = self.seed().await?;
          report.seeded += added;
          if added == 0 {
            tracing::warn!("Seeding found no new matches; nothing to crawl");
            CrawlState::Done
          } else {
            CrawlState::Draining
          }
        }

        CrawlState::Draining => {
          if *shutdown.borrow() {
            CrawlState::Done
          } else if let Some(match_id) = batch.pop_front() {
            started = Instant::now();
            match self.process_match(&match_id).await? {
              Some(commit) => {
                attempts.remove(&match_id);
                report.record(&commit);
              }
              None => {
                report.matches_failed += 1;
                let failed = attempts.entry(match_id.clone()).or_default();
                *failed += 1;
                if *failed > 1 {
                  report.retries += 1;
                  tracing::warn!(%match_id, attempts = *failed, "Match failed again");
                }
              }
            }
            if batch.is_empty() {
              tracing::info!(batch = report.batches, "Completed batch");
            }
            CrawlState::IdleSleep
          } else if self.limit_reached(report.batches) {
            CrawlState::Done
          } else {
            batch.extend(
              self
                .store
                .dequeue_random_batch(self.settings.batch_size)
                .await
                .map_err(Error::store)?,
            );
            if batch.is_empty() {
              CrawlState::Seeding
            } else {
              report.batches += 1;
              tracing::info!(batch = report.batches, size = batch.len(), "Beginning batch");
              CrawlState::Draining
            }
          }
        }

        CrawlState::IdleSleep => {
          if self.pace(started, &mut shutdown).await {
            CrawlState::Draining
          } else {
            CrawlState::Done
          }
        }

        CrawlState::Done => break,
      };
    }

    tracing::info!(
      seeded = report.seeded,
      batches = report.batches,
      processed = report.matches_processed,
      failed = report.matches_failed,
      retries = report.retries,
      participations = report.participations,
      masteries = report.masteries,
      enqueued = report.enqueued,
      "Crawl finished"
    );
    Ok(report)
  }

  fn limit_reached(&self, batches: u64) -> bool {
    self.settings.max_iterations.is_some_and(|max| batches >= max)
  }

  /// Sleep out the rest of the iteration floor. Returns `false` if shutdown
  /// was requested before or during the sleep.
  async fn pace(&self, started: Instant, shutdown: &mut watch::Receiver<bool>) -> bool {
    let floor = self.settings.iteration_floor();
    let elapsed = started.elapsed();
    if elapsed < floor {
      let remaining = floor - elapsed;
      tracing::info!(
        secs = remaining.as_secs_f64(),
        "Sleeping to stay under the rate limit"
      );
      tokio::select! {
        _ = tokio::time::sleep(remaining) => {}
        _ = shutdown_requested(shutdown) => {
          tracing::info!("Shutdown requested during sleep");
          return false;
        }
      }
    }
    !*shutdown.borrow()
  }
}

/// Resolves once the flag is `true`. A dropped sender never resolves.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
  if shutdown.wait_for(|stop| *stop).await.is_err() {
    std::future::pending::<()>().await;
  }
}
