//! Display formatting for byte counts and timestamps.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Format a byte size into a human readable string using binary units
pub fn format_size(bytes: u64) -> String {
    const UNIT: f64 = 1024.0;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    let bytes = bytes as f64;
    if bytes < UNIT {
        return format!("{:.1} B", bytes);
    }

    let mut size = bytes / UNIT;
    let mut exp = 0;
    while size >= UNIT && exp < PREFIXES.len() - 1 {
        size /= UNIT;
        exp += 1;
    }

    format!("{:.1} {}iB", size, PREFIXES[exp])
}

/// Format how long ago `then` was, relative to `now`
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then);

    if diff < Duration::minutes(1) {
        "Less than a minute ago".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff < Duration::hours(24) {
        format!("{} hours ago", diff.num_hours())
    } else if diff < Duration::hours(48) {
        "Yesterday".to_string()
    } else {
        format!("{} days ago", diff.num_days())
    }
}

/// Format an engine epoch timestamp relative to the current time
pub fn format_unix_time_ago(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(then) => format_time_ago(then, Utc::now()),
        None => "Unknown".to_string(),
    }
}

/// Format an RFC 3339 engine timestamp relative to the current time,
/// passing through anything that does not parse
pub fn format_rfc3339_ago(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(then) => format_time_ago(then.with_timezone(&Utc), Utc::now()),
        Err(_) => timestamp.to_string(),
    }
}

/// Truncate a string to `width` characters, ending with `...` when cut
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width <= 3 {
        return s.chars().take(width).collect();
    }
    let mut cut: String = s.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}
