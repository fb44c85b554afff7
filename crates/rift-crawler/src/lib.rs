//! The Rift crawl loop and its process plumbing.
//!
//! [`Crawler`] drives a breadth-first crawl over the player/match graph: it
//! seeds the frontier from a few root players, then repeatedly draws pending
//! matches, harvests their participants, and commits each harvest to the
//! store. The `crawl` and `load-champions` binaries wrap it with
//! configuration and logging.

pub mod config;
pub mod crawler;
pub mod error;
pub mod telemetry;

pub use config::Config;
pub use crawler::{CrawlReport, CrawlSettings, CrawlState, Crawler};
pub use error::{Error, Result};
