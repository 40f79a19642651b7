//! Topshelf: a chart-listing scraper
//!
//! This crate crawls paginated chart pages from two site layouts (a
//! bestseller book chart and a top-rated movie chart), extracts the raw
//! listing fields from each page, normalizes them into typed records, and
//! aggregates the records into a single in-memory collection together with
//! a manifest of the pages that failed.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod output;
pub mod sources;
pub mod state;

use thiserror::Error;

/// Main error type for Topshelf operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid field pattern '{name}': {message}")]
    Pattern { name: String, message: String },

    #[error("Invalid page state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Per-listing normalization errors
///
/// A `NormalizeError` drops exactly one listing; sibling listings on the
/// same page are unaffected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Unparsable rank text: '{0}'")]
    InvalidRank(String),

    #[error("Unparsable rating text: '{0}'")]
    InvalidRating(String),

    #[error("Rating {0} outside [0, 10]")]
    RatingOutOfRange(f64),
}

/// Result type alias for Topshelf operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_source, fetch_page, CancelToken, FetchOutcome, Pacing};
pub use model::{BookListing, CrawlResult, MovieListing, PageFailure, RawPage, RawRecord};
pub use sources::{BookSource, MovieSource, SourceAdapter};
pub use state::PageState;
