//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::{BTreeMap, HashSet};

use rift_core::{
  champion::{Champion, ChampionInfo},
  fact::{MasteryFact, MatchHarvest, Participation},
  id::{ChampionId, MatchId, Puuid},
  store::CrawlStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn mid(s: &str) -> MatchId { MatchId::new(s).unwrap() }

fn pid(s: &str) -> Puuid { Puuid::new(s).unwrap() }

fn ids(raw: &[&str]) -> Vec<MatchId> { raw.iter().map(|s| mid(s)).collect() }

fn participation(match_id: &str, puuid: &str, champion: i64) -> Participation {
  Participation {
    match_id:      mid(match_id),
    puuid:         pid(puuid),
    champion_id:   ChampionId(champion),
    team_position: "JUNGLE".into(),
    win:           champion % 2 == 0,
  }
}

fn mastery(puuid: &str, champion: i64, points: i64) -> MasteryFact {
  MasteryFact {
    puuid:           pid(puuid),
    champion_id:     ChampionId(champion),
    champion_points: points,
  }
}

// ─── Queue ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn enqueue_is_an_idempotent_union() {
  let s = store().await;
  let a = ids(&["NA1_1", "NA1_2", "NA1_3"]);
  let union = ids(&["NA1_1", "NA1_2", "NA1_3", "NA1_4", "NA1_5"]);

  assert_eq!(s.enqueue_many(a).await.unwrap(), 3);
  assert_eq!(s.enqueue_many(union).await.unwrap(), 2);
  assert_eq!(s.pending_count().await.unwrap(), 5);
}

#[tokio::test]
async fn enqueue_ignores_duplicates_within_one_call() {
  let s = store().await;
  let added = s
    .enqueue_many(ids(&["NA1_1", "NA1_1", "NA1_2"]))
    .await
    .unwrap();
  assert_eq!(added, 2);
  assert_eq!(s.pending_count().await.unwrap(), 2);
}

#[tokio::test]
async fn enqueue_nothing_is_a_no_op() {
  let s = store().await;
  assert_eq!(s.enqueue_many(Vec::new()).await.unwrap(), 0);
  assert_eq!(s.pending_count().await.unwrap(), 0);
}

#[tokio::test]
async fn dequeue_from_empty_queue_is_empty() {
  let s = store().await;
  assert!(s.dequeue_random_batch(4).await.unwrap().is_empty());
}

#[tokio::test]
async fn dequeue_is_bounded_and_only_returns_pending_ids() {
  let s = store().await;
  let pending = ids(&["NA1_1", "NA1_2", "NA1_3"]);
  s.enqueue_many(pending.clone()).await.unwrap();

  let small = s.dequeue_random_batch(2).await.unwrap();
  assert_eq!(small.len(), 2);

  let large = s.dequeue_random_batch(10).await.unwrap();
  assert_eq!(large.len(), 3);

  let pending: HashSet<_> = pending.into_iter().collect();
  let drawn: HashSet<_> = large.iter().cloned().collect();
  assert_eq!(drawn.len(), 3, "no id drawn twice");
  assert!(small.iter().chain(&large).all(|id| pending.contains(id)));
}

#[tokio::test]
async fn dequeue_does_not_remove() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1", "NA1_2"])).await.unwrap();
  s.dequeue_random_batch(2).await.unwrap();
  assert_eq!(s.pending_count().await.unwrap(), 2);
}

#[tokio::test]
async fn remove_twice_is_a_no_op() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1", "NA1_2"])).await.unwrap();

  assert!(s.remove(&mid("NA1_1")).await.unwrap());
  assert!(!s.remove(&mid("NA1_1")).await.unwrap());
  assert_eq!(s.pending_count().await.unwrap(), 1);
}

#[tokio::test]
async fn plain_removal_does_not_block_rediscovery() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1"])).await.unwrap();
  s.remove(&mid("NA1_1")).await.unwrap();

  assert_eq!(s.enqueue_many(ids(&["NA1_1"])).await.unwrap(), 1);
}

#[tokio::test]
async fn committed_matches_are_never_requeued() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1"])).await.unwrap();
  s.commit_match(MatchHarvest::new(mid("NA1_1"))).await.unwrap();

  assert_eq!(s.enqueue_many(ids(&["NA1_1", "NA1_2"])).await.unwrap(), 1);
  assert_eq!(s.dequeue_random_batch(10).await.unwrap(), ids(&["NA1_2"]));
}

// ─── Facts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mastery_keeps_the_first_written_points() {
  let s = store().await;

  assert!(s.insert_mastery(mastery("p1", 266, 1_000)).await.unwrap());
  assert!(!s.insert_mastery(mastery("p1", 266, 9_999)).await.unwrap());

  let stored = s.mastery(&pid("p1"), ChampionId(266)).await.unwrap().unwrap();
  assert_eq!(stored.champion_points, 1_000);
}

#[tokio::test]
async fn mastery_is_keyed_by_player_and_champion() {
  let s = store().await;
  assert!(s.insert_mastery(mastery("p1", 1, 10)).await.unwrap());
  assert!(s.insert_mastery(mastery("p1", 2, 20)).await.unwrap());
  assert!(s.insert_mastery(mastery("p2", 1, 30)).await.unwrap());

  assert!(s.mastery(&pid("p2"), ChampionId(2)).await.unwrap().is_none());
}

#[tokio::test]
async fn participations_are_append_only() {
  let s = store().await;
  let rows = vec![participation("NA1_1", "p1", 1), participation("NA1_1", "p2", 2)];

  assert_eq!(s.append_participations(rows.clone()).await.unwrap(), 2);
  assert_eq!(s.append_participations(rows.clone()).await.unwrap(), 2);

  let stored = s.participations_for(&mid("NA1_1")).await.unwrap();
  assert_eq!(stored.len(), 4);
  assert_eq!(stored[0], rows[0]);
  assert_eq!(stored[1], rows[1]);
}

// ─── Commit ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn commit_match_applies_the_whole_harvest() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1", "NA1_9"])).await.unwrap();
  s.insert_mastery(mastery("p2", 2, 5)).await.unwrap();

  let mut harvest = MatchHarvest::new(mid("NA1_1"));
  harvest.participations =
    vec![participation("NA1_1", "p1", 1), participation("NA1_1", "p2", 2)];
  harvest.masteries = vec![mastery("p1", 1, 100), mastery("p2", 2, 200)];
  // NA1_1 is the match itself, NA1_9 is already pending.
  harvest.discovered = ids(&["NA1_1", "NA1_2", "NA1_9", "NA1_3", "NA1_2"]);

  let commit = s.commit_match(harvest).await.unwrap();
  assert_eq!(commit.participations, 2);
  assert_eq!(commit.masteries, 1);
  assert_eq!(commit.enqueued, 2);
  assert!(commit.removed);

  let mut pending = s.dequeue_random_batch(10).await.unwrap();
  pending.sort();
  assert_eq!(pending, ids(&["NA1_2", "NA1_3", "NA1_9"]));

  let kept = s.mastery(&pid("p2"), ChampionId(2)).await.unwrap().unwrap();
  assert_eq!(kept.champion_points, 5);
}

#[tokio::test]
async fn commit_of_a_match_no_longer_pending_still_writes_facts() {
  let s = store().await;
  let mut harvest = MatchHarvest::new(mid("NA1_1"));
  harvest.participations = vec![participation("NA1_1", "p1", 1)];

  let commit = s.commit_match(harvest).await.unwrap();
  assert!(!commit.removed);
  assert_eq!(commit.participations, 1);
}

// ─── Reference data ──────────────────────────────────────────────────────────

fn champion(key: i64, id: &str) -> Champion {
  Champion {
    champion_id: ChampionId(key),
    id:          id.into(),
    name:        id.into(),
    title:       "the Test".into(),
    blurb:       "...".into(),
    partype:     "Mana".into(),
    tags:        vec!["Fighter".into()],
    version:     "13.22.1".into(),
    info:        ChampionInfo { attack: 8, defense: 4, magic: 3, difficulty: 4 },
    stats:       BTreeMap::from([("hp".to_owned(), 650.0), ("armor".to_owned(), 38.0)]),
  }
}

#[tokio::test]
async fn replace_champions_replaces_rather_than_accumulates() {
  let s = store().await;

  let first = vec![champion(266, "Aatrox"), champion(103, "Ahri")];
  assert_eq!(s.replace_champions(first).await.unwrap(), 2);
  assert_eq!(s.champion_count().await.unwrap(), 2);

  let second = vec![champion(266, "Aatrox")];
  assert_eq!(s.replace_champions(second).await.unwrap(), 1);
  assert_eq!(s.champion_count().await.unwrap(), 1);
}

#[tokio::test]
async fn reference_load_leaves_the_queue_alone() {
  let s = store().await;
  s.enqueue_many(ids(&["NA1_1"])).await.unwrap();
  s.replace_champions(vec![champion(1, "Annie")]).await.unwrap();
  assert_eq!(s.pending_count().await.unwrap(), 1);
}
