//! Core types and trait definitions for the Rift match crawler.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! API client, the SQLite store and the crawl loop all depend on it.

#![allow(async_fn_in_trait)]

pub mod api;
pub mod champion;
pub mod error;
pub mod fact;
pub mod id;
pub mod store;

pub use error::{Error, Result};
