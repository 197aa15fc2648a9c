//! Display formatting helpers for dashboard content.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats an ISO-8601 timestamp as e.g. `12 Feb 2025, 14:30` (UTC).
///
/// Timestamps without an offset are taken as UTC. Input that cannot be
/// parsed is returned unchanged.
pub fn format_news_date(iso: &str) -> String {
    const DISPLAY: &str = "%-d %b %Y, %H:%M";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
        return parsed.with_timezone(&Utc).format(DISPLAY).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc().format(DISPLAY).to_string();
    }
    iso.to_string()
}

/// Formats a USD price with thousands separators and 2 to 6 fraction digits.
pub fn format_price(price: f64) -> String {
    let raw = format!("{:.6}", price.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < 2 {
        fraction.push('0');
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${}.{fraction}", group_thousands(int_part))
}

/// Shortens `text` to `max_chars` characters, appending `…` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
