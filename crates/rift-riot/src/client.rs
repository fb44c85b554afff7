//! Async HTTP client wrapping the Riot match, mastery and summoner APIs.

use std::time::Duration;

use reqwest::{Client, Url, header::HeaderValue};
use serde::de::DeserializeOwned;

use rift_core::{
  api::RiotApi,
  champion::Champion,
  fact::{MasteryFact, Participation},
  id::{ChampionId, MatchId, Puuid},
};

use crate::{
  config::RiotConfig,
  dto::{ChampionFileDto, MasteryDto, MatchDto, SummonerDto},
  Error, Result,
};

/// Async client for the Riot REST API.
///
/// Clones share the inner [`reqwest::Client`]. There is no retry or internal
/// rate limiting.
#[derive(Clone)]
pub struct RiotClient {
  client: Client,
  token:  Option<HeaderValue>,
  config: RiotConfig,
}

const TOKEN_HEADER: &str = "X-Riot-Token";

impl RiotClient {
  /// Build a client that sends `config.api_key` to the Riot endpoints. The
  /// key is never sent to Data Dragon. A blank key sends no header.
  pub fn new(config: RiotConfig) -> Result<Self> {
    let key = config.api_key.trim();
    let token = if key.is_empty() {
      None
    } else {
      let mut token = HeaderValue::from_str(key).map_err(|_| Error::InvalidApiKey)?;
      token.set_sensitive(true);
      Some(token)
    };

    let client = Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .build()?;
    Ok(Self { client, token, config })
  }

  pub fn config(&self) -> &RiotConfig { &self.config }

  // ── URLs ──────────────────────────────────────────────────────────────────

  /// `GET /lol/match/v5/matches/by-puuid/{puuid}/ids?startTime&endTime&type&start&count`
  fn match_ids_url(&self, puuid: &Puuid) -> Result<Url> {
    let window = &self.config.match_window;
    let mut url = endpoint(
      &self.config.regional_url,
      &["lol", "match", "v5", "matches", "by-puuid", puuid.as_str(), "ids"],
    )?;
    url
      .query_pairs_mut()
      .append_pair("startTime", &window.start.timestamp().to_string())
      .append_pair("endTime", &window.end.timestamp().to_string())
      .append_pair("type", &window.queue_type)
      .append_pair("start", "0")
      .append_pair("count", &window.count.to_string());
    Ok(url)
  }

  /// `GET /lol/match/v5/matches/{matchId}`
  fn match_url(&self, match_id: &MatchId) -> Result<Url> {
    endpoint(
      &self.config.regional_url,
      &["lol", "match", "v5", "matches", match_id.as_str()],
    )
  }

  /// `GET /lol/champion-mastery/v4/champion-masteries/by-puuid/{puuid}/by-champion/{id}`
  fn mastery_url(&self, puuid: &Puuid, champion_id: ChampionId) -> Result<Url> {
    endpoint(
      &self.config.platform_url,
      &[
        "lol",
        "champion-mastery",
        "v4",
        "champion-masteries",
        "by-puuid",
        puuid.as_str(),
        "by-champion",
        &champion_id.to_string(),
      ],
    )
  }

  /// `GET /lol/summoner/v4/summoners/by-name/{name}`
  fn summoner_url(&self, name: &str) -> Result<Url> {
    endpoint(
      &self.config.platform_url,
      &["lol", "summoner", "v4", "summoners", "by-name", name],
    )
  }

  // ── Transport ─────────────────────────────────────────────────────────────

  /// Issue a GET, optionally authenticated, and decode the body. Any non-2xx
  /// status is an error.
  async fn fetch<T: DeserializeOwned>(
    &self,
    url:   Url,
    token: Option<&HeaderValue>,
  ) -> Result<T> {
    tracing::debug!(%url, "GET");
    let mut req = self.client.get(url.clone());
    if let Some(token) = token {
      req = req.header(TOKEN_HEADER, token.clone());
    }
    let resp = req.send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { url: url.to_string(), status });
    }

    let body = resp.bytes().await?;
    serde_json::from_slice(&body)
      .map_err(|e| Error::Malformed { url: url.to_string(), reason: e.to_string() })
  }

  /// GET against a Riot endpoint, carrying the API key.
  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
    self.fetch(url, self.token.as_ref()).await
  }

  // ── Reference data ────────────────────────────────────────────────────────

  /// Fetch and flatten the Data Dragon champion list.
  pub async fn champions(&self) -> Result<Vec<Champion>> {
    let url = Url::parse(&self.config.ddragon_url)
      .map_err(|e| Error::InvalidUrl(format!("{}: {e}", self.config.ddragon_url)))?;
    let file: ChampionFileDto = self.fetch(url, None).await?;
    file.into_champions()
  }
}

// ─── RiotApi impl ────────────────────────────────────────────────────────────

impl RiotApi for RiotClient {
  type Error = Error;

  async fn match_ids_by_puuid(&self, puuid: &Puuid) -> Result<Vec<MatchId>> {
    let url = self.match_ids_url(puuid)?;
    self.get_json(url).await
  }

  async fn match_participants(&self, match_id: &MatchId) -> Result<Vec<Participation>> {
    let url = self.match_url(match_id)?;
    let shown = url.to_string();
    let detail: MatchDto = self.get_json(url).await?;
    detail.into_participations(match_id, &shown)
  }

  async fn champion_mastery(
    &self,
    puuid:       &Puuid,
    champion_id: ChampionId,
  ) -> Result<MasteryFact> {
    let url = self.mastery_url(puuid, champion_id)?;
    let dto: MasteryDto = self.get_json(url).await?;
    Ok(dto.into())
  }

  async fn puuid_by_summoner_name(&self, name: &str) -> Result<Puuid> {
    let url = self.summoner_url(name)?;
    let summoner: SummonerDto = self.get_json(url).await?;
    Ok(summoner.puuid)
  }
}

/// Join percent-encoded path segments onto `base`.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
  let mut url = Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;
  url
    .path_segments_mut()
    .map_err(|_| Error::InvalidUrl(base.to_owned()))?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}
