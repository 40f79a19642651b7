//! Source adapters
//!
//! A [`SourceAdapter`] binds a URL template, request headers, an extractor
//! strategy and per-field normalization into one per-site pipeline. The two
//! chart sites share no markup, but behind this trait the orchestrator
//! drives them identically.

mod books;
mod movies;

pub use books::BookSource;
pub use movies::MovieSource;

use serde::Serialize;

use crate::model::{Ranked, RawRecord};
use crate::NormalizeError;

/// One per-site extraction pipeline
pub trait SourceAdapter {
    /// The typed listing this source produces
    type Listing: Ranked + Serialize;

    /// Short source name used in logs and summaries
    fn name(&self) -> &'static str;

    /// URL for a 1-based page index
    fn page_url(&self, page: u32) -> String;

    /// Headers sent with every request to this source
    fn headers(&self) -> &[(String, String)];

    /// Extracts raw records from one document, in document order
    fn extract(&self, html: &str) -> Vec<RawRecord>;

    /// Converts one raw record into a typed listing
    ///
    /// A `NormalizeError` drops that single record; siblings on the same
    /// page are unaffected.
    fn normalize(&self, record: &RawRecord) -> Result<Self::Listing, NormalizeError>;
}
