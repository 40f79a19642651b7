//! Pattern-based extraction
//!
//! Splits a document into listing blocks with a block regex, then runs one
//! named field rule per attribute inside each block. Scoping the field
//! patterns to a single block isolates damage: a reordered or truncated
//! fragment drops that one listing instead of silently emptying the page,
//! which is what a single monolithic multi-group pattern does.

use regex::Regex;

use crate::model::RawRecord;
use crate::ScrapeError;

/// A named extraction rule applied within one listing block
#[derive(Debug)]
pub struct FieldRule {
    name: &'static str,
    regex: Regex,
    required: bool,
}

impl FieldRule {
    /// Compiles a field rule from a pattern with exactly one capture group
    ///
    /// Patterns are compiled in dot-matches-newline mode, since listing
    /// markup spans lines.
    pub fn new(name: &'static str, pattern: &str, required: bool) -> Result<Self, ScrapeError> {
        let regex = Regex::new(&format!("(?s){}", pattern)).map_err(|e| ScrapeError::Pattern {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name,
            regex,
            required,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Per-block pattern extractor
#[derive(Debug)]
pub struct BlockExtractor {
    block: Regex,
    /// Blocks not containing this substring are ignored outright; lets a
    /// broad block pattern coexist with unrelated markup (nav lists etc.)
    marker: Option<&'static str>,
    fields: Vec<FieldRule>,
}

impl BlockExtractor {
    /// Builds an extractor from a block pattern and field rules
    pub fn new(
        block_pattern: &str,
        marker: Option<&'static str>,
        fields: Vec<FieldRule>,
    ) -> Result<Self, ScrapeError> {
        let block = Regex::new(&format!("(?s){}", block_pattern)).map_err(|e| {
            ScrapeError::Pattern {
                name: "block".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            block,
            marker,
            fields,
        })
    }

    /// Scans the full document once and yields one record per listing block
    ///
    /// Records come back in document order. A block missing a required field
    /// is skipped with a logged reason; optional fields are simply absent
    /// from the record.
    pub fn extract(&self, html: &str) -> Vec<RawRecord> {
        let mut records = Vec::new();

        'blocks: for (index, found) in self.block.find_iter(html).enumerate() {
            let block = found.as_str();

            if let Some(marker) = self.marker {
                if !block.contains(marker) {
                    continue;
                }
            }

            let mut record = RawRecord::new();
            for rule in &self.fields {
                match rule.regex.captures(block).and_then(|c| c.get(1)) {
                    Some(group) => record.insert(rule.name, group.as_str()),
                    None if rule.required => {
                        tracing::debug!(
                            "Skipping listing block {}: required field '{}' did not match",
                            index,
                            rule.name
                        );
                        continue 'blocks;
                    }
                    None => {}
                }
            }

            records.push(record);
        }

        records
    }
}
