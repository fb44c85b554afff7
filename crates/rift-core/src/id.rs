//! Identifier newtypes.
//!
//! Match and player identifiers are opaque upstream strings; champion ids are
//! the integer `key` Data Dragon assigns each champion.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Uniquely identifies one played match (e.g. `NA1_4812345678`).
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
  /// Wrap a raw identifier. Blank strings are rejected.
  pub fn new(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.trim().is_empty() {
      return Err(Error::EmptyIdentifier("match"));
    }
    Ok(Self(raw))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

/// Player account identifier (Riot PUUID).
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Puuid(String);

impl Puuid {
  /// Wrap a raw PUUID. Blank strings are rejected.
  pub fn new(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.trim().is_empty() {
      return Err(Error::EmptyIdentifier("player"));
    }
    Ok(Self(raw))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

/// Numeric champion key.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct ChampionId(pub i64);

impl FromStr for ChampionId {
  type Err = Error;

  /// Data Dragon ships champion keys as decimal strings (`"266"`).
  fn from_str(s: &str) -> Result<Self> {
    s.trim()
      .parse::<i64>()
      .map(Self)
      .map_err(|_| Error::InvalidChampionKey(s.to_owned()))
  }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

macro_rules! string_id {
  ($ty:ident) => {
    impl TryFrom<String> for $ty {
      type Error = Error;

      fn try_from(raw: String) -> Result<Self> { Self::new(raw) }
    }

    impl From<$ty> for String {
      fn from(id: $ty) -> String { id.0 }
    }

    impl AsRef<str> for $ty {
      fn as_ref(&self) -> &str { &self.0 }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

string_id!(MatchId);
string_id!(Puuid);

impl fmt::Display for ChampionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_identifiers_are_rejected() {
    assert!(MatchId::new("  ").is_err());
    assert!(Puuid::new("").is_err());
    assert_eq!(MatchId::new("NA1_1").unwrap().as_str(), "NA1_1");
  }

  #[test]
  fn champion_key_parses_from_decimal_string() {
    assert_eq!("266".parse::<ChampionId>().unwrap(), ChampionId(266));
    assert!(matches!(
      "Aatrox".parse::<ChampionId>(),
      Err(Error::InvalidChampionKey(_))
    ));
  }

  #[test]
  fn display_is_the_raw_identifier() {
    let id = Puuid::new("abc-123").unwrap();
    assert_eq!(id.to_string(), "abc-123");
    assert_eq!(String::from(id), "abc-123");
  }
}
