//! Error types for `rift-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid champion key: {0:?}")]
  InvalidChampionKey(String),

  #[error("empty {0} identifier")]
  EmptyIdentifier(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
