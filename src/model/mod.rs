//! Core data model for the scraping pipeline
//!
//! Types flow through the pipeline in this order: the fetcher produces a
//! [`RawPage`], the extractor turns it into [`RawRecord`]s, the normalizer
//! turns each record into a typed listing, and the orchestrator collects
//! listings and per-page failures into a [`CrawlResult`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::NormalizeError;

/// An HTML document as fetched, before any extraction
///
/// Immutable once constructed; owned by the fetcher until handed to the
/// extractor.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The URL the document was fetched from
    pub url: String,

    /// The full document body
    pub body: String,

    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl RawPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// One untyped listing as extracted from HTML, field name -> raw text
///
/// Produced by an extractor strategy, consumed and discarded by the
/// normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<&'static str, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.insert(name, value.into());
    }

    /// Looks up an optional field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Looks up a required field, failing the listing if absent
    pub fn require(&self, name: &'static str) -> Result<&str, NormalizeError> {
        self.get(name).ok_or(NormalizeError::MissingField(name))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Access to the aggregation key shared by every listing type
pub trait Ranked {
    /// Chart position, >= 1, unique within one crawl of one source
    fn rank(&self) -> u32;
}

/// A typed bestseller book entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookListing {
    pub rank: u32,
    pub title: String,
    pub image_url: String,
    /// List price in yuan; 0 when the source omits or mangles it
    pub price: f64,
    pub author: String,
    pub published: String,
    /// Recommend percentage text, or the sentinel when absent
    pub note: String,
}

impl Ranked for BookListing {
    fn rank(&self) -> u32 {
        self.rank
    }
}

/// A typed top-chart movie entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieListing {
    pub rank: u32,
    pub title: String,
    pub image_url: String,
    /// Aggregate rating in [0, 10]
    pub rating: f64,
    /// Director and cast text as printed on the chart
    pub staff: String,
    /// One-line tagline, or the sentinel when absent
    pub note: String,
}

impl Ranked for MovieListing {
    fn rank(&self) -> u32 {
        self.rank
    }
}

/// A page that could not be crawled, with the reason it was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFailure {
    /// 1-based page index within the configured range
    pub page: u32,

    /// Status line or error text, captured verbatim
    pub reason: String,
}

/// The frozen outcome of crawling one source across its page range
///
/// Created empty at crawl start, grown monotonically as pages complete, and
/// never mutated after the orchestrator returns it. Listings keep extraction
/// order; no deduplication is applied.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult<T> {
    pub listings: Vec<T>,
    pub failures: Vec<PageFailure>,
}

impl<T> Default for CrawlResult<T> {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> CrawlResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one page's listings in extraction order
    pub fn extend_page(&mut self, listings: Vec<T>) {
        self.listings.extend(listings);
    }

    pub fn record_failure(&mut self, page: u32, reason: impl Into<String>) {
        self.failures.push(PageFailure {
            page,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty() && self.failures.is_empty()
    }

    /// Fraction of attempted pages that failed, given the attempted count
    pub fn failure_ratio(&self, pages_attempted: u32) -> f64 {
        if pages_attempted == 0 {
            return 0.0;
        }
        self.failures.len() as f64 / pages_attempted as f64
    }
}

impl<T: Ranked> CrawlResult<T> {
    /// Ranks that occur more than once, in first-seen order
    ///
    /// Duplicates are only observed on malformed sources; they are retained
    /// in `listings` and surfaced here instead of being merged.
    pub fn duplicate_ranks(&self) -> Vec<u32> {
        let mut seen = HashMap::new();
        let mut dupes = Vec::new();
        for listing in &self.listings {
            let count = seen.entry(listing.rank()).or_insert(0u32);
            *count += 1;
            if *count == 2 {
                dupes.push(listing.rank());
            }
        }
        dupes
    }
}
