use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{DomainError, DomainResult};

#[inline]
fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive substring test used by every search box.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

/// Rejects empty or whitespace-only input with the given message.
pub fn require_non_blank<'a>(value: &'a str, message: &str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(message));
    }
    Ok(trimmed)
}

/// Blank comments are stored as `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `9:05 AM`
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// `Oct 12, 2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Oct 12, 2026 at 9:05 AM`
pub fn format_datetime(at: NaiveDateTime) -> String {
    format!("{} at {}", format_date(at.date()), format_time(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ignores_case() {
        assert!(contains_ignore_case("Sarah Wilson", "sarah"));
        assert!(contains_ignore_case("Engineering", "NEER"));
        assert!(!contains_ignore_case("Design", "eng"));
    }

    #[test]
    fn blank_input_is_rejected() {
        let err = require_non_blank("   ", "Please enter a reason").unwrap_err();
        assert_eq!(err.user_message(), "Please enter a reason");
        assert_eq!(require_non_blank(" Flu ", "x").unwrap(), "Flu");
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" ok ")), Some("ok".to_string()));
    }

    #[test]
    fn formats_like_the_app() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 12)
            .unwrap()
            .and_hms_opt(17, 30, 0)
            .unwrap();
        assert_eq!(format_time(at), "5:30 PM");
        assert_eq!(format_date(at.date()), "Oct 12, 2026");
        assert_eq!(format_datetime(at), "Oct 12, 2026 at 5:30 PM");
    }
}
