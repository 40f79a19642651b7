//! Output module
//!
//! The pipeline's only persistence: the final listing sequence is handed
//! off as a JSON array, and a short per-source summary is printed after
//! each crawl. Charts, spreadsheets and reports are downstream consumers,
//! not part of this crate.

mod json;
mod summary;

pub use json::write_listings;
pub use summary::{render_summary, print_summary};

use thiserror::Error;

/// Errors that can occur while persisting crawl output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize listings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
