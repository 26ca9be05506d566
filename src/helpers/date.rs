//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::html::html_escape;

/// Parse a date string in the formats content authors commonly use
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Generate a <time> element for a raw date string.
///
/// Unrecognized dates are shown verbatim without a `datetime` attribute.
pub fn time_tag(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!(
            r#"<time datetime="{}">{}</time>"#,
            date.format("%Y-%m-%d"),
            full_date(&date)
        ),
        None => format!("<time>{}</time>", html_escape(raw.trim())),
    }
}
