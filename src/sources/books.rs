//! Bestseller book chart adapter
//!
//! The book chart serves dense single-line list markup with no stable
//! element structure, so extraction is pattern-based: one block per `<li>`,
//! one named field rule per attribute. Pages carry 20 listings each and
//! paginate by rank window. No special headers are needed.

use crate::extract::{BlockExtractor, FieldRule};
use crate::model::{BookListing, RawRecord};
use crate::normalize::{normalize_note, normalize_price, normalize_rank};
use crate::sources::SourceAdapter;
use crate::NormalizeError;

/// Adapter for the bestseller book chart
pub struct BookSource {
    base_url: String,
    extractor: BlockExtractor,
    headers: Vec<(String, String)>,
}

impl BookSource {
    pub fn new(base_url: impl Into<String>) -> crate::Result<Self> {
        let extractor = BlockExtractor::new(
            r"<li>.*?</li>",
            Some("list_num"),
            vec![
                FieldRule::new("rank", r#"class="list_num.*?(\d+)\.</div>"#, true)?,
                FieldRule::new("image", r#"<img src="(.*?)""#, true)?,
                FieldRule::new("title", r#"class="name".*?title="(.*?)""#, true)?,
                FieldRule::new("note", r#"class="tuijian">(.*?)</span>"#, false)?,
                FieldRule::new(
                    "author",
                    r#"class="publisher_info">.*?target="_blank">(.*?)</a>"#,
                    false,
                )?,
                FieldRule::new("published", r#"class="biaosheng">.*?<span>(.*?)</span>"#, false)?,
                FieldRule::new("price", r#"class="price_n">(.*?)</span>"#, false)?,
            ],
        )?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            extractor,
            headers: Vec::new(),
        })
    }
}

impl SourceAdapter for BookSource {
    type Listing = BookListing;

    fn name(&self) -> &'static str {
        "books"
    }

    fn page_url(&self, page: u32) -> String {
        format!(
            "{}/books/fivestars/01.00.00.00.00.00-recent30-0-0-1-{}",
            self.base_url, page
        )
    }

    fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    fn extract(&self, html: &str) -> Vec<RawRecord> {
        self.extractor.extract(html)
    }

    fn normalize(&self, record: &RawRecord) -> Result<BookListing, NormalizeError> {
        Ok(BookListing {
            rank: normalize_rank(record.require("rank")?)?,
            title: record.require("title")?.to_string(),
            image_url: record.require("image")?.to_string(),
            price: normalize_price(record.get("price").unwrap_or("")),
            author: record.get("author").unwrap_or("").trim().to_string(),
            published: record.get("published").unwrap_or("").to_string(),
            note: normalize_note(record.get("note")),
        })
    }
}
