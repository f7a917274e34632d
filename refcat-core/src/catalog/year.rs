//! Publication year extraction from page display names

use once_cell::sync::Lazy;
use regex::Regex;

/// Year assigned to a page whose name carries no four-digit token.
///
/// Lower than any real publication year, so undated pages sort last.
pub const UNKNOWN_YEAR: u32 = 1000;

// ASCII digits only; `\d` would also match other Unicode digit classes.
// The first four digits of a longer run count as a match.
static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]{4}").expect("year pattern is a valid regex"));

/// Extract the first four-digit year from `text`
///
/// Returns [`UNKNOWN_YEAR`] when no run of four ASCII digits exists.
/// The first match scanning left to right wins, so
/// `"Comparison of 1990 and 2010 data"` yields 1990.
pub fn extract_year(text: &str) -> u32 {
    YEAR_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(UNKNOWN_YEAR)
}
