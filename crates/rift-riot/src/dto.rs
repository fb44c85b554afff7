//! Upstream response shapes and their conversion into domain rows.
//!
//! Only the fields the crawler keeps are declared; serde ignores the rest.

use std::collections::BTreeMap;

use serde::Deserialize;

use rift_core::{
  champion::{Champion, ChampionInfo},
  fact::{MasteryFact, Participation},
  id::{ChampionId, MatchId, Puuid},
};

use crate::{Error, Result};

// ─── Match detail ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchDto {
  pub info: Option<MatchInfoDto>,
}

#[derive(Debug, Deserialize)]
pub struct MatchInfoDto {
  pub participants: Option<Vec<ParticipantDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
  pub puuid:         Puuid,
  pub champion_id:   ChampionId,
  /// Blank for remakes and some non-standard queues.
  #[serde(default)]
  pub team_position: String,
  pub win:           bool,
}

impl MatchDto {
  pub fn into_participations(self, match_id: &MatchId, url: &str) -> Result<Vec<Participation>> {
    let participants = self
      .info
      .and_then(|info| info.participants)
      .ok_or_else(|| Error::Malformed {
        url:    url.to_owned(),
        reason: "missing info.participants".into(),
      })?;

    Ok(
      participants
        .into_iter()
        .map(|p| Participation {
          match_id:      match_id.clone(),
          puuid:         p.puuid,
          champion_id:   p.champion_id,
          team_position: p.team_position,
          win:           p.win,
        })
        .collect(),
    )
  }
}

// ─── Mastery / summoner ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryDto {
  pub puuid:           Puuid,
  pub champion_id:     ChampionId,
  pub champion_points: i64,
}

impl From<MasteryDto> for MasteryFact {
  fn from(dto: MasteryDto) -> Self {
    Self {
      puuid:           dto.puuid,
      champion_id:     dto.champion_id,
      champion_points: dto.champion_points,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct SummonerDto {
  pub puuid: Puuid,
}

// ─── Data Dragon ─────────────────────────────────────────────────────────────

/// `champion.json`: `{"version": ..., "data": {"Aatrox": {...}, ...}}`.
#[derive(Debug, Deserialize)]
pub struct ChampionFileDto {
  pub data: BTreeMap<String, ChampionDto>,
}

#[derive(Debug, Deserialize)]
pub struct ChampionDto {
  pub version: String,
  pub id:      String,
  pub key:     String,
  pub name:    String,
  pub title:   String,
  pub blurb:   String,
  pub info:    ChampionInfo,
  #[serde(default)]
  pub tags:    Vec<String>,
  #[serde(default)]
  pub partype: String,
  #[serde(default)]
  pub stats:   BTreeMap<String, f64>,
}

impl ChampionFileDto {
  /// Flatten into rows ordered by champion key. The `image` block is dropped.
  pub fn into_champions(self) -> Result<Vec<Champion>> {
    let mut champions = self
      .data
      .into_values()
      .map(|c| -> Result<Champion> {
        Ok(Champion {
          champion_id: c.key.parse()?,
          id:          c.id,
          name:        c.name,
          title:       c.title,
          blurb:       c.blurb,
          partype:     c.partype,
          tags:        c.tags,
          version:     c.version,
          info:        c.info,
          stats:       c.stats,
        })
      })
      .collect::<Result<Vec<_>>>()?;
    champions.sort_by_key(|c| c.champion_id);
    Ok(champions)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MATCH_URL: &str = "https://example.test/lol/match/v5/matches/NA1_1";

  #[test]
  fn participants_become_one_row_each() {
    let body = r#"{
      "metadata": {"matchId": "NA1_1"},
      "info": {
        "gameMode": "CLASSIC",
        "participants": [
          {"puuid": "p1", "championId": 266, "teamPosition": "TOP", "win": true, "kills": 3},
          {"puuid": "p2", "championId": 103, "teamPosition": "", "win": false}
        ]
      }
    }"#;
    let dto: MatchDto = serde_json::from_str(body).unwrap();
    let match_id = MatchId::new("NA1_1").unwrap();

    let rows = dto.into_participations(&match_id, MATCH_URL).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].puuid.as_str(), "p1");
    assert_eq!(rows[0].champion_id, ChampionId(266));
    assert_eq!(rows[0].team_position, "TOP");
    assert!(rows[0].win);
    assert_eq!(rows[1].team_position, "");
    assert!(rows.iter().all(|r| r.match_id == match_id));
  }

  #[test]
  fn missing_participants_is_malformed() {
    let dto: MatchDto =
      serde_json::from_str(r#"{"status": {"message": "Data not found"}}"#).unwrap();
    let err = dto
      .into_participations(&MatchId::new("NA1_1").unwrap(), MATCH_URL)
      .unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }));
  }

  #[test]
  fn mastery_reads_camel_case_fields() {
    let dto: MasteryDto = serde_json::from_str(
      r#"{"puuid": "p1", "championId": 266, "championLevel": 7, "championPoints": 123456}"#,
    )
    .unwrap();
    let fact = MasteryFact::from(dto);
    assert_eq!(fact.champion_id, ChampionId(266));
    assert_eq!(fact.champion_points, 123_456);
  }

  #[test]
  fn blank_puuid_is_rejected() {
    assert!(serde_json::from_str::<SummonerDto>(r#"{"puuid": ""}"#).is_err());
  }

  #[test]
  fn champion_file_is_flattened_and_ordered_by_key() {
    let body = r#"{
      "type": "champion",
      "version": "13.22.1",
      "data": {
        "Ahri": {
          "version": "13.22.1", "id": "Ahri", "key": "103", "name": "Ahri",
          "title": "the Nine-Tailed Fox", "blurb": "...",
          "info": {"attack": 3, "defense": 4, "magic": 8, "difficulty": 5},
          "image": {"full": "Ahri.png"},
          "tags": ["Mage", "Assassin"], "partype": "Mana",
          "stats": {"hp": 590, "hpperlevel": 96}
        },
        "Aatrox": {
          "version": "13.22.1", "id": "Aatrox", "key": "266", "name": "Aatrox",
          "title": "the Darkin Blade", "blurb": "...",
          "info": {"attack": 8, "defense": 4, "magic": 3, "difficulty": 4},
          "image": {"full": "Aatrox.png"},
          "tags": ["Fighter", "Tank"], "partype": "Blood Well",
          "stats": {"hp": 650, "attackspeed": 0.651}
        }
      }
    }"#;
    let dto: ChampionFileDto = serde_json::from_str(body).unwrap();

    let champions = dto.into_champions().unwrap();
    assert_eq!(champions.len(), 2);
    assert_eq!(champions[0].champion_id, ChampionId(103));
    assert_eq!(champions[1].name, "Aatrox");
    assert_eq!(champions[1].info.attack, 8);
    assert_eq!(champions[1].stats.get("attackspeed"), Some(&0.651));
    assert_eq!(champions[0].tags, vec!["Mage", "Assassin"]);
  }

  #[test]
  fn non_numeric_champion_key_fails() {
    let body = r#"{"data": {"X": {
      "version": "1", "id": "X", "key": "X", "name": "X", "title": "", "blurb": "",
      "info": {"attack": 0, "defense": 0, "magic": 0, "difficulty": 0}
    }}}"#;
    let dto: ChampionFileDto = serde_json::from_str(body).unwrap();
    assert!(matches!(dto.into_champions(), Err(Error::Core(_))));
  }
}
