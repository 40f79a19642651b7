//! Top-chart movie adapter
//!
//! The movie chart has a stable DOM (a `.grid_view` container holding one
//! `li` per movie), so extraction is structural. The site rejects requests
//! without a browser-like `User-Agent`, and pages carry 25 listings each,
//! addressed by a `start` offset rather than a page number.

use crate::extract::{FieldSelector, SelectorExtractor};
use crate::model::{MovieListing, RawRecord};
use crate::normalize::{normalize_note, normalize_rank, normalize_rating};
use crate::sources::SourceAdapter;
use crate::NormalizeError;

/// Listings per chart page; determines the `start` offset for a page index
const PAGE_SIZE: u32 = 25;

/// Adapter for the top-rated movie chart
pub struct MovieSource {
    base_url: String,
    extractor: SelectorExtractor,
    headers: Vec<(String, String)>,
}

impl MovieSource {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> crate::Result<Self> {
        let extractor = SelectorExtractor::new(
            ".grid_view",
            "li",
            vec![
                FieldSelector::text("rank", ".pic em", true)?,
                FieldSelector::text("title", ".title", true)?,
                FieldSelector::attr("image", "a img", "src", true)?,
                FieldSelector::text("rating", ".rating_num", true)?,
                FieldSelector::text("staff", "p", true)?,
                FieldSelector::text("note", ".inq", false)?,
            ],
        )?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            extractor,
            headers: vec![("User-Agent".to_string(), user_agent.into())],
        })
    }
}

impl SourceAdapter for MovieSource {
    type Listing = MovieListing;

    fn name(&self) -> &'static str {
        "movies"
    }

    fn page_url(&self, page: u32) -> String {
        let start = page.saturating_sub(1) * PAGE_SIZE;
        format!("{}/top250?start={}&filter=", self.base_url, start)
    }

    fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    fn extract(&self, html: &str) -> Vec<RawRecord> {
        self.extractor.extract(html)
    }

    fn normalize(&self, record: &RawRecord) -> Result<MovieListing, NormalizeError> {
        Ok(MovieListing {
            rank: normalize_rank(record.require("rank")?)?,
            title: record.require("title")?.to_string(),
            image_url: record.require("image")?.to_string(),
            rating: normalize_rating(record.require("rating")?)?,
            staff: record.require("staff")?.to_string(),
            note: normalize_note(record.get("note")),
        })
    }
}
