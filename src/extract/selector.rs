//! Structural (selector-based) extraction
//!
//! Locates a named container element, iterates its listing items, and looks
//! up named sub-elements for each item. An item missing a required
//! sub-element is skipped with a logged reason; an absent container yields
//! zero records and is a successful empty page, not a failure.

use scraper::{ElementRef, Html, Selector};

use crate::model::RawRecord;
use crate::ScrapeError;

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A named sub-element lookup applied within one listing item
#[derive(Debug)]
pub struct FieldSelector {
    name: &'static str,
    selector: Selector,
    /// Attribute to read; text content when None
    attr: Option<&'static str>,
    required: bool,
}

impl FieldSelector {
    /// Field taken from an element's text content
    pub fn text(name: &'static str, selector: &str, required: bool) -> Result<Self, ScrapeError> {
        Ok(Self {
            name,
            selector: parse_selector(selector)?,
            attr: None,
            required,
        })
    }

    /// Field taken from an element attribute (e.g. an image `src`)
    pub fn attr(
        name: &'static str,
        selector: &str,
        attr: &'static str,
        required: bool,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            name,
            selector: parse_selector(selector)?,
            attr: Some(attr),
            required,
        })
    }

    fn resolve(&self, item: &ElementRef) -> Option<String> {
        let element = item.select(&self.selector).next()?;
        match self.attr {
            Some(attr) => element.value().attr(attr).map(str::to_string),
            None => {
                let text: String = element.text().collect();
                Some(text.trim().to_string())
            }
        }
    }
}

/// Container-and-items structural extractor
#[derive(Debug)]
pub struct SelectorExtractor {
    container: Selector,
    item: Selector,
    fields: Vec<FieldSelector>,
}

impl SelectorExtractor {
    pub fn new(
        container: &str,
        item: &str,
        fields: Vec<FieldSelector>,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            container: parse_selector(container)?,
            item: parse_selector(item)?,
            fields,
        })
    }

    /// Walks the document once and yields one record per resolvable item
    pub fn extract(&self, html: &str) -> Vec<RawRecord> {
        let document = Html::parse_document(html);

        let container = match document.select(&self.container).next() {
            Some(c) => c,
            None => {
                tracing::debug!("Listing container not found; treating page as empty");
                return Vec::new();
            }
        };

        let mut records = Vec::new();

        'items: for (index, item) in container.select(&self.item).enumerate() {
            let mut record = RawRecord::new();
            for field in &self.fields {
                match field.resolve(&item) {
                    Some(value) => record.insert(field.name, value),
                    None if field.required => {
                        tracing::debug!(
                            "Skipping listing item {}: required element '{}' absent",
                            index,
                            field.name
                        );
                        continue 'items;
                    }
                    None => {}
                }
            }
            records.push(record);
        }

        records
    }
}
