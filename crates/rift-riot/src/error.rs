//! Error type for `rift-riot`.

use reqwest::StatusCode;
use thiserror::Error;

/// Any failure talking to the upstream API.
#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rift_core::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {url} returned {status}")]
  Status { url: String, status: StatusCode },

  #[error("malformed response from {url}: {reason}")]
  Malformed { url: String, reason: String },

  #[error("api key is missing or not a valid header value")]
  InvalidApiKey,

  #[error("invalid url: {0}")]
  InvalidUrl(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
