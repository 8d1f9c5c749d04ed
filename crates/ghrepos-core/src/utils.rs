// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for ghrepos.
//!
//! Provides description flattening and truncation, and creation-date
//! formatting for repository records.

use chrono::DateTime;
use tracing::warn;

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Keeps the first `max_len` characters of `text`, appending `...` if
/// anything was cut.
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
///
/// # Examples
///
/// ```
/// use ghrepos_core::utils::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
/// assert_eq!(truncate("Hello, world", 5), "Hello...");
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Replaces every run of line breaks, tabs and other control characters
/// with a single space, so the text fits on one table row.
///
/// Plain spaces are left alone.
///
/// # Examples
///
/// ```
/// use ghrepos_core::utils::single_line;
///
/// assert_eq!(single_line("first\r\nsecond\tthird"), "first second third");
/// ```
#[must_use]
pub fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.chars() {
        if c.is_control() || (c.is_whitespace() && c != ' ') {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

/// Formats an RFC 3339 timestamp as `"<Month> <Day>, <Year> <H>:<M>:<S>"`.
///
/// The month is the full English name and numeric fields are unpadded,
/// so `2020-03-01T09:05:00Z` becomes `March 1, 2020 9:5:0`. The offset
/// carried by the timestamp is kept (no conversion to local time).
///
/// Returns `None` if the input is not valid RFC 3339.
///
/// # Examples
///
/// ```
/// use ghrepos_core::utils::format_timestamp;
///
/// assert_eq!(
///     format_timestamp("2020-03-01T00:00:00Z").as_deref(),
///     Some("March 1, 2020 0:0:0")
/// );
/// assert_eq!(format_timestamp("yesterday"), None);
/// ```
#[must_use]
pub fn format_timestamp(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.format("%B %-d, %Y %-H:%-M:%-S").to_string())
}

/// Formats a creation timestamp for display and matching.
///
/// Falls back to the raw value, with a warning, when it cannot be parsed.
#[must_use]
pub fn format_created_at(timestamp: &str) -> String {
    if let Some(formatted) = format_timestamp(timestamp) {
        formatted
    } else {
        warn!(timestamp, "Could not parse creation date, keeping raw value");
        timestamp.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("short", 70), "short");
        assert_eq!(truncate("", 70), "");
    }

    #[test]
    fn truncate_exact_length_unchanged() {
        let text = "a".repeat(70);
        assert_eq!(truncate(&text, 70), text);
    }

    #[test]
    fn truncate_long_text() {
        let text = "b".repeat(71);
        let result = truncate(&text, 70);
        assert_eq!(result.chars().count(), 73);
        assert!(result.ends_with("..."));
        assert!(result.starts_with(&"b".repeat(70)));
    }

    #[test]
    fn truncate_multibyte() {
        let text = "é".repeat(80);
        let result = truncate(&text, 70);
        assert_eq!(result, format!("{}...", "é".repeat(70)));
    }

    #[test]
    fn single_line_collapses_breaks() {
        assert_eq!(
            single_line("first line\nsecond line\r\nthird\tcol"),
            "first line second line third col"
        );
        assert_eq!(single_line("a\u{2028}b\u{0}c"), "a b c");
    }

    #[test]
    fn single_line_keeps_plain_text() {
        assert_eq!(single_line("two  spaces"), "two  spaces");
        assert_eq!(single_line(""), "");
    }

    #[test]
    fn format_timestamp_unpadded_fields() {
        assert_eq!(
            format_timestamp("2019-01-01T00:00:00Z").as_deref(),
            Some("January 1, 2019 0:0:0")
        );
        assert_eq!(
            format_timestamp("2021-11-23T14:07:09Z").as_deref(),
            Some("November 23, 2021 14:7:9")
        );
    }

    #[test]
    fn format_timestamp_keeps_offset() {
        assert_eq!(
            format_timestamp("2020-03-01T23:30:00-05:00").as_deref(),
            Some("March 1, 2020 23:30:0")
        );
    }

    #[test]
    fn format_created_at_falls_back_to_raw() {
        assert_eq!(format_created_at("2020-13-45"), "2020-13-45");
        assert_eq!(format_created_at(""), "");
    }
}
