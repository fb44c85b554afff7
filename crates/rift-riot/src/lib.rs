//! HTTP client for the Riot Games API and the Data Dragon CDN.
//!
//! [`RiotClient`] implements [`rift_core::api::RiotApi`] for the crawl loop
//! and additionally fetches the champion reference data.

mod client;
mod dto;

pub mod config;
pub mod error;

pub use client::RiotClient;
pub use config::{MatchWindow, RiotConfig};
pub use error::{Error, Result};
