//! Formatting utilities for cell and summary display
//!
//! Column formatters for rates and amounts, plus date helpers shared by the
//! table renderer and the CLI.

use jiff::{Timestamp, civil::Date};

use crate::table::{Row, Value};

/// Currency prefix for Peruvian soles.
pub const CURRENCY: &str = "S/";

/// Format a date string for display
///
/// Extracts just the date part (YYYY-MM-DD) from an ISO datetime string.
/// If the string is too short, returns it unchanged.
///
/// # Examples
///
/// ```
/// use rivalscope::formatting::format_date_for_display;
///
/// assert_eq!(format_date_for_display("2024-01-15T10:30:00Z"), "2024-01-15");
/// assert_eq!(format_date_for_display("2024-01-15"), "2024-01-15");
/// assert_eq!(format_date_for_display("short"), "short");
/// ```
pub fn format_date_for_display(date_str: &str) -> String {
    match date_str.get(..10) {
        Some(prefix) if prefix.parse::<Date>().is_ok() => prefix.to_string(),
        _ => date_str.to_string(),
    }
}

/// Coarse age of `timestamp` relative to `now`, e.g. `3h ago`.
///
/// Returns the input unchanged when it is not an RFC 3339 timestamp.
pub fn format_age(timestamp: &str, now: Timestamp) -> String {
    let Ok(then) = timestamp.parse::<Timestamp>() else {
        return timestamp.to_string();
    };
    let secs = now.as_second() - then.as_second();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

fn number(value: &Value) -> Option<f64> {
    value.as_number()
}

/// `10` -> `10%`
pub fn percent() -> impl Fn(&Value, &Row) -> String + Send + Sync + 'static {
    |value: &Value, _: &Row| match number(value) {
        Some(v) => format!("{v}%"),
        None => value.raw_text(),
    }
}

/// `150` -> `S/150`
pub fn soles() -> impl Fn(&Value, &Row) -> String + Send + Sync + 'static {
    |value: &Value, _: &Row| match number(value) {
        Some(v) => format!("{CURRENCY}{v}"),
        None => value.raw_text(),
    }
}

/// `3.5` -> `S/3.50`
pub fn soles_fixed() -> impl Fn(&Value, &Row) -> String + Send + Sync + 'static {
    |value: &Value, _: &Row| match number(value) {
        Some(v) => format!("{CURRENCY}{v:.2}"),
        None => value.raw_text(),
    }
}

/// Date cells as `YYYY-MM-DD`.
pub fn date() -> impl Fn(&Value, &Row) -> String + Send + Sync + 'static {
    |value: &Value, _: &Row| format_date_for_display(&value.raw_text())
}

/// List cells joined by `, `, each entry with underscores shown as spaces.
pub fn labels() -> impl Fn(&Value, &Row) -> String + Send + Sync + 'static {
    |value: &Value, _: &Row| match value {
        Value::List(items) => items
            .iter()
            .map(|s| s.replace('_', " "))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.raw_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_formatters() {
        let row = Row::new();
        assert_eq!(percent()(&Value::Number(10.0), &row), "10%");
        assert_eq!(soles()(&Value::Number(150.0), &row), "S/150");
        assert_eq!(soles_fixed()(&Value::Number(3.5), &row), "S/3.50");
        assert_eq!(soles()(&Value::Text("n/a".into()), &row), "n/a");
    }

    #[test]
    fn test_labels_formatter() {
        let value = Value::List(vec!["driver_behavior".into(), "pricing".into()]);
        assert_eq!(labels()(&value, &Row::new()), "driver behavior, pricing");
    }

    #[test]
    fn test_format_age() {
        let now: Timestamp = "2024-01-15T12:00:00Z".parse().unwrap();
        assert_eq!(format_age("2024-01-15T11:59:30Z", now), "just now");
        assert_eq!(format_age("2024-01-15T11:15:00Z", now), "45m ago");
        assert_eq!(format_age("2024-01-15T09:00:00Z", now), "3h ago");
        assert_eq!(format_age("2024-01-13T12:00:00Z", now), "2d ago");
        assert_eq!(format_age("yesterday", now), "yesterday");
    }

    #[test]
    fn test_non_date_prefix_is_kept() {
        assert_eq!(format_date_for_display("not-a-date-at-all"), "not-a-date-at-all");
    }
}
