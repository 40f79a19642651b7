//! Crawl driving logic
//!
//! This module contains the networking and orchestration half of the
//! pipeline:
//! - HTTP fetching with outcome classification
//! - Randomized inter-request pacing
//! - The sequential per-source crawl loop with failure isolation

mod fetcher;
mod orchestrator;
mod pacing;

pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use orchestrator::{crawl_source, CancelToken, CrawlOptions};
pub use pacing::Pacing;
