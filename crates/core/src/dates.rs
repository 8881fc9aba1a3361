//! Lenient calendar-date parsing for user and CSV input.

use chrono::NaiveDate;

/// Accepted input formats, tried in order.
pub const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

/// Parse `input` with the first matching entry of [`DATE_FORMATS`].
///
/// Surrounding whitespace is ignored. Returns `None` for empty or
/// unrecognized input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
