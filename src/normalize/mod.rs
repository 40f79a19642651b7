//! Field normalization
//!
//! Pure conversion functions from raw extracted text to typed values. Each
//! field converts independently so one field's failure never invalidates
//! another: required fields (rank, rating) fail the listing with a
//! [`NormalizeError`], advisory fields (price, note) degrade to a documented
//! default instead.

use crate::NormalizeError;

/// Sentinel stored when a source omits an optional free-text field
pub const NOT_AVAILABLE: &str = "NOT AVAILABLE";

/// Converts rank text to an integer chart position
///
/// The book chart renders ranks with a trailing period ("3."); a single
/// trailing period is stripped before parsing. Rank is the aggregation key,
/// so unparsable input fails the whole listing.
pub fn normalize_rank(text: &str) -> Result<u32, NormalizeError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix('.').unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .map_err(|_| NormalizeError::InvalidRank(text.to_string()))
}

/// Converts price text to a non-negative amount
///
/// Strips the `&yen;` entity and both yen-sign glyphs (U+00A5 and U+FFE5)
/// plus surrounding whitespace. Price is advisory: empty or unparsable input
/// normalizes to 0, never an error.
pub fn normalize_price(text: &str) -> f64 {
    let cleaned = text
        .replace("&yen;", "")
        .replace('¥', "")
        .replace('￥', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Converts rating text to a float in [0, 10]
///
/// Rating is a required analytic field: parse failures and out-of-range
/// values both fail the listing.
pub fn normalize_rating(text: &str) -> Result<f64, NormalizeError> {
    let rating = text
        .trim()
        .parse::<f64>()
        .map_err(|_| NormalizeError::InvalidRating(text.to_string()))?;
    if !(0.0..=10.0).contains(&rating) {
        return Err(NormalizeError::RatingOutOfRange(rating));
    }
    Ok(rating)
}

/// Passes a free-text note through verbatim, substituting the sentinel when
/// the source omitted it
pub fn normalize_note(text: Option<&str>) -> String {
    match text {
        Some(note) => note.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
