//! The SQLite implementation of [`CrawlStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use rift_core::{
  champion::Champion,
  fact::{MasteryFact, MatchCommit, MatchHarvest, Participation},
  id::{ChampionId, MatchId, Puuid},
  store::CrawlStore,
};

use crate::{
  encode::{decode_count, encode_limit, encode_tags, RawMastery, RawParticipation},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A crawl store backed by a single SQLite file. Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Statement helpers ───────────────────────────────────────────────────────
//
// Each helper takes a plain connection so it can run either on its own or
// inside the transaction opened by `commit_match`.

fn enqueue_in(conn: &rusqlite::Connection, ids: &[MatchId]) -> rusqlite::Result<usize> {
  let mut stmt = conn.prepare_cached(
    "INSERT OR IGNORE INTO matchid_queue (matchid)
     SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM matchid_processed WHERE matchid = ?1)",
  )?;
  let mut added = 0;
  for id in ids {
    added += stmt.execute(rusqlite::params![id.as_str()])?;
  }
  Ok(added)
}

fn remove_in(conn: &rusqlite::Connection, id: &MatchId) -> rusqlite::Result<bool> {
  let n = conn.execute(
    "DELETE FROM matchid_queue WHERE matchid = ?1",
    rusqlite::params![id.as_str()],
  )?;
  Ok(n > 0)
}

fn mark_processed_in(conn: &rusqlite::Connection, id: &MatchId) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT OR IGNORE INTO matchid_processed (matchid) VALUES (?1)",
    rusqlite::params![id.as_str()],
  )?;
  Ok(())
}

fn append_in(
  conn: &rusqlite::Connection,
  rows: &[Participation],
) -> rusqlite::Result<usize> {
  let mut stmt = conn.prepare_cached(
    "INSERT INTO fct_matches (matchid, puuid, championid, teamposition, win)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for row in rows {
    stmt.execute(rusqlite::params![
      row.match_id.as_str(),
      row.puuid.as_str(),
      row.champion_id.0,
      row.team_position,
      row.win,
    ])?;
  }
  Ok(rows.len())
}

fn insert_mastery_in(
  conn: &rusqlite::Connection,
  fact: &MasteryFact,
) -> rusqlite::Result<bool> {
  let n = conn
    .prepare_cached(
      "INSERT OR IGNORE INTO dim_champion_mastery (puuid, championid, championpoints)
       VALUES (?1, ?2, ?3)",
    )?
    .execute(rusqlite::params![
      fact.puuid.as_str(),
      fact.champion_id.0,
      fact.champion_points,
    ])?;
  Ok(n > 0)
}

// ─── CrawlStore impl ─────────────────────────────────────────────────────────

impl CrawlStore for SqliteStore {
  type Error = crate::Error;

  // ── Queue ─────────────────────────────────────────────────────────────────

  async fn enqueue_many(&self, ids: Vec<MatchId>) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }

    let added = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let added = enqueue_in(&tx, &ids)?;
        tx.commit()?;
        Ok(added)
      })
      .await?;

    Ok(added)
  }

  async fn dequeue_random_batch(&self, n: usize) -> Result<Vec<MatchId>> {
    let limit = encode_limit(n);

    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT matchid FROM matchid_queue ORDER BY RANDOM() LIMIT ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .map(MatchId::new)
        .collect::<rift_core::Result<Vec<_>>>()?,
    )
  }

  async fn remove(&self, id: &MatchId) -> Result<bool> {
    let id = id.clone();
    Ok(self.conn.call(move |conn| Ok(remove_in(conn, &id)?)).await?)
  }

  async fn pending_count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM matchid_queue", [], |r| r.get(0))?)
      })
      .await?;
    decode_count(n, "matchid_queue")
  }

  // ── Facts ─────────────────────────────────────────────────────────────────

  async fn append_participations(&self, rows: Vec<Participation>) -> Result<usize> {
    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let written = append_in(&tx, &rows)?;
        tx.commit()?;
        Ok(written)
      })
      .await?;
    Ok(written)
  }

  async fn insert_mastery(&self, fact: MasteryFact) -> Result<bool> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(insert_mastery_in(conn, &fact)?))
        .await?,
    )
  }

  async fn commit_match(&self, harvest: MatchHarvest) -> Result<MatchCommit> {
    let commit = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let participations = append_in(&tx, &harvest.participations)?;
        let mut masteries = 0;
        for fact in &harvest.masteries {
          if insert_mastery_in(&tx, fact)? {
            masteries += 1;
          }
        }
        // Mark first: the match shows up in every participant's history and
        // must not go back into the queue it is leaving.
        mark_processed_in(&tx, &harvest.match_id)?;
        let removed = remove_in(&tx, &harvest.match_id)?;
        let enqueued = enqueue_in(&tx, &harvest.discovered)?;

        tx.commit()?;
        Ok(MatchCommit { participations, masteries, enqueued, removed })
      })
      .await?;

    Ok(commit)
  }

  // ── Reference data ────────────────────────────────────────────────────────

  async fn replace_champions(&self, champions: Vec<Champion>) -> Result<usize> {
    let rows = champions
      .into_iter()
      .map(|c| encode_tags(&c.tags).map(|tags| (c, tags)))
      .collect::<Result<Vec<_>>>()?;

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM dim_champion_stats", [])?;
        tx.execute("DELETE FROM dim_champions", [])?;

        {
          let mut champ_stmt = tx.prepare(
            "INSERT INTO dim_champions (
               champion_id, id, name, title, blurb, partype, tags, version,
               attack, defense, magic, difficulty
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          )?;
          let mut stat_stmt = tx.prepare(
            "INSERT INTO dim_champion_stats (champion_id, stat, value) VALUES (?1, ?2, ?3)",
          )?;

          for (c, tags) in &rows {
            champ_stmt.execute(rusqlite::params![
              c.champion_id.0,
              c.id,
              c.name,
              c.title,
              c.blurb,
              c.partype,
              tags,
              c.version,
              c.info.attack,
              c.info.defense,
              c.info.magic,
              c.info.difficulty,
            ])?;
            for (stat, value) in &c.stats {
              stat_stmt.execute(rusqlite::params![c.champion_id.0, stat, value])?;
            }
          }
        }

        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    Ok(written)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn participations_for(&self, match_id: &MatchId) -> Result<Vec<Participation>> {
    let id = match_id.as_str().to_owned();

    let raws: Vec<RawParticipation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT matchid, puuid, championid, teamposition, win
           FROM fct_matches
           WHERE matchid = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawParticipation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParticipation::into_participation).collect()
  }

  async fn mastery(
    &self,
    puuid:       &Puuid,
    champion_id: ChampionId,
  ) -> Result<Option<MasteryFact>> {
    let puuid = puuid.as_str().to_owned();

    let raw: Option<RawMastery> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT puuid, championid, championpoints
               FROM dim_champion_mastery
               WHERE puuid = ?1 AND championid = ?2",
              rusqlite::params![puuid, champion_id.0],
              |row| {
                Ok(RawMastery {
                  puuid:          row.get(0)?,
                  championid:     row.get(1)?,
                  championpoints: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMastery::into_fact).transpose()
  }

  async fn champion_count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM dim_champions", [], |r| r.get(0))?)
      })
      .await?;
    decode_count(n, "dim_champions")
  }
}
