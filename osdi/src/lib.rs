//! Client and aggregation pipeline for OSDI-style advocacy-platform APIs.
//!
//! Fetches supporter listings (tag people, petition signatures, paginated
//! form submissions), resolves linked person records, and produces ordered
//! name rosters with a TTL'd cache in front.

pub mod aggregate;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics_defs;
pub mod resources;

pub use aggregate::{Roster, SupporterAggregator};
pub use cache::RosterCache;
pub use client::ApiClient;
pub use config::{FetchLimits, Source, Upstream};
pub use error::UpstreamError;
