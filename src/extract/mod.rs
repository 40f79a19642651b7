//! Extractor strategies
//!
//! Two ways of turning one HTML document into zero or more [`RawRecord`]s:
//!
//! - [`BlockExtractor`] runs named regex rules inside each listing block,
//!   for layouts scraped by pattern matching.
//! - [`SelectorExtractor`] walks a named container element with CSS
//!   selectors, for layouts with a stable DOM structure.
//!
//! Both tolerate silent partial extraction: a malformed block or item drops
//! only itself, and a page without any listing markup yields zero records
//! rather than an error.
//!
//! [`RawRecord`]: crate::model::RawRecord

mod pattern;
mod selector;

pub use pattern::{BlockExtractor, FieldRule};
pub use selector::{FieldSelector, SelectorExtractor};
