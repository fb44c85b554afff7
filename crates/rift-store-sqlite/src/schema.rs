//! SQL schema for the Rift SQLite store.
//!
//! Executed once at connection startup. Table and column names follow the
//! warehouse naming used by downstream queries (`fct_*`, `dim_*`).

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The crawl frontier. A match id is pending at most once.
CREATE TABLE IF NOT EXISTS matchid_queue (
    matchid TEXT NOT NULL UNIQUE
);

-- Matches whose harvest has been committed; never re-enqueued.
CREATE TABLE IF NOT EXISTS matchid_processed (
    matchid TEXT PRIMARY KEY
);

-- First observation per (player, champion) wins; later inserts are ignored.
CREATE TABLE IF NOT EXISTS dim_champion_mastery (
    puuid          TEXT    NOT NULL,
    championid     INTEGER NOT NULL,
    championpoints INTEGER NOT NULL,
    UNIQUE (puuid, championid)
);

-- Append-only; one row per participant per match.
CREATE TABLE IF NOT EXISTS fct_matches (
    matchid      TEXT    NOT NULL,
    puuid        TEXT    NOT NULL,
    championid   INTEGER NOT NULL,
    teamposition TEXT    NOT NULL,
    win          INTEGER NOT NULL   -- 0 | 1
);

-- Reference data, replaced wholesale by the champion loader.
CREATE TABLE IF NOT EXISTS dim_champions (
    champion_id INTEGER PRIMARY KEY,
    id          TEXT    NOT NULL,
    name        TEXT    NOT NULL,
    title       TEXT    NOT NULL,
    blurb       TEXT    NOT NULL,
    partype     TEXT    NOT NULL,
    tags        TEXT    NOT NULL DEFAULT '[]',   -- JSON array
    version     TEXT    NOT NULL,
    attack      INTEGER NOT NULL,
    defense     INTEGER NOT NULL,
    magic       INTEGER NOT NULL,
    difficulty  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_champion_stats (
    champion_id INTEGER NOT NULL REFERENCES dim_champions(champion_id),
    stat        TEXT    NOT NULL,
    value       REAL    NOT NULL,
    PRIMARY KEY (champion_id, stat)
);

CREATE INDEX IF NOT EXISTS fct_matches_matchid_idx ON fct_matches(matchid);
CREATE INDEX IF NOT EXISTS fct_matches_puuid_idx   ON fct_matches(puuid);

PRAGMA user_version = 1;
";
