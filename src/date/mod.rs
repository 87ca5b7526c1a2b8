//! Posting-date resolution and range filtering
//!
//! Two parsers live here with different strictness:
//! - `extract_date` scans free listing text for an embedded date and is lenient
//!   about separators and zero padding
//! - `parse_operator_date` accepts only an exact `YYYY-MM-DD` literal
//!
//! A missing or unparseable date is `None`, never an error.

mod range;

pub use range::{is_excluded, parse_include_undated, ConfigWarning, DateRange};

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// `2025.08.28`, `2025-08-28`, `2025/8/5`; separators may differ within one date
static EMBEDDED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})[./-]([0-9]{1,2})[./-]([0-9]{1,2})")
        .expect("Failed to compile embedded date regex")
});

static OPERATOR_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$")
        .expect("Failed to compile operator date regex")
});

/// Finds the first `YYYY<sep>MM<sep>DD` pattern in `text` and converts it to a date
///
/// Only the first match is considered. If it does not name a real calendar
/// day (month 13, February 30, year 0, ...) the result is `None`.
///
/// # Example
///
/// ```
/// use uni_notice::date::extract_date;
///
/// let date = extract_date("공지 2025.08.28 작성").unwrap();
/// assert_eq!(date.to_string(), "2025-08-28");
/// assert!(extract_date("2025-13-40").is_none());
/// ```
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let caps = EMBEDDED_DATE_RE.captures(text)?;
    ymd_from_captures(&caps)
}

/// Parses an operator-supplied range bound in strict `YYYY-MM-DD` form
///
/// Surrounding whitespace is ignored; anything else that deviates from the
/// shape (missing padding, other separators, trailing text) yields `None`.
pub fn parse_operator_date(text: &str) -> Option<NaiveDate> {
    let caps = OPERATOR_DATE_RE.captures(text.trim())?;
    ymd_from_captures(&caps)
}

fn ymd_from_captures(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps[1].parse().ok()?;
    if year < 1 {
        return None;
    }
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_date_any_separator() {
        assert_eq!(extract_date("공지 2025.08.28 작성"), Some(ymd(2025, 8, 28)));
        assert_eq!(extract_date("2025-08-28"), Some(ymd(2025, 8, 28)));
        assert_eq!(extract_date("2025/08/28"), Some(ymd(2025, 8, 28)));
    }

    #[test]
    fn test_extract_date_unpadded() {
        assert_eq!(extract_date("posted: 2025/8/5"), Some(ymd(2025, 8, 5)));
    }

    #[test]
    fn test_extract_date_mixed_separators() {
        assert_eq!(extract_date("2025.08-28"), Some(ymd(2025, 8, 28)));
        assert_eq!(extract_date("at 2024/1.9!"), Some(ymd(2024, 1, 9)));
    }

    #[test]
    fn test_extract_date_impossible_date() {
        assert_eq!(extract_date("2025-13-40"), None);
        assert_eq!(extract_date("2025.02.30"), None);
    }

    #[test]
    fn test_year_zero_is_not_a_date() {
        assert_eq!(extract_date("0000-01-01"), None);
        assert_eq!(parse_operator_date("0000-01-01"), None);
        assert_eq!(extract_date("0001-01-01"), Some(ymd(1, 1, 1)));
    }

    #[test]
    fn test_extract_date_uses_first_match_only() {
        // First match is invalid; later valid dates are not consulted
        assert_eq!(extract_date("2025-13-01 then 2025-08-01"), None);
        assert_eq!(extract_date("2025-07-01 ~ 2025-08-01"), Some(ymd(2025, 7, 1)));
    }

    #[test]
    fn test_extract_date_absent() {
        assert_eq!(extract_date(""), None);
        assert_eq!(extract_date("조회수 1234"), None);
        assert_eq!(extract_date("25.08.28"), None);
    }

    #[test]
    fn test_parse_operator_date_strict() {
        assert_eq!(parse_operator_date("2025-08-01"), Some(ymd(2025, 8, 1)));
        assert_eq!(parse_operator_date(" 2025-08-01\n"), Some(ymd(2025, 8, 1)));

        assert_eq!(parse_operator_date("2025.08.01"), None);
        assert_eq!(parse_operator_date("2025-8-1"), None);
        assert_eq!(parse_operator_date("2025-08-01x"), None);
        assert_eq!(parse_operator_date("2025-02-30"), None);
        assert_eq!(parse_operator_date(""), None);
    }
}
