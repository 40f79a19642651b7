//! Per-source crawl summary

use crate::model::{CrawlResult, Ranked};

/// Renders a short human-readable summary of one source crawl
pub fn render_summary<T: Ranked>(
    source: &str,
    result: &CrawlResult<T>,
    pages_attempted: u32,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("=== {} ===", source));
    lines.push(format!("Listings collected: {}", result.listings.len()));
    lines.push(format!(
        "Pages failed: {} of {} ({:.0}%)",
        result.failures.len(),
        pages_attempted,
        result.failure_ratio(pages_attempted) * 100.0
    ));

    for failure in &result.failures {
        lines.push(format!("  page {}: {}", failure.page, failure.reason));
    }

    let dupes = result.duplicate_ranks();
    if !dupes.is_empty() {
        lines.push(format!("Duplicate ranks retained: {:?}", dupes));
    }

    lines.join("\n")
}

/// Prints the summary to stdout
pub fn print_summary<T: Ranked>(source: &str, result: &CrawlResult<T>, pages_attempted: u32) {
    println!("{}", render_summary(source, result, pages_attempted));
}
