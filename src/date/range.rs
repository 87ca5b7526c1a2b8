use chrono::NaiveDate;
use thiserror::Error;

use super::parse_operator_date;

/// Tokens accepted as "yes" for boolean-like operator flags
const TRUTHY: [&str; 4] = ["y", "yes", "true", "1"];

/// Tokens recognized as an explicit "no"
const FALSY: [&str; 4] = ["n", "no", "false", "0"];

/// Problems found in operator-supplied filter settings
///
/// None of these stop a crawl. They are reported so that a mistyped bound
/// does not silently widen or empty the crawl scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("{field} is not a YYYY-MM-DD date: {value:?}; the bound is ignored")]
    MalformedBound { field: &'static str, value: String },

    #[error("date range is inverted ({from} > {to}); no dated notice will be accepted")]
    InvertedRange { from: NaiveDate, to: NaiveDate },

    #[error("{field} has unrecognized value {value:?}; treated as false")]
    UnrecognizedFlag { field: &'static str, value: String },
}

/// Inclusive posting-date window applied to listing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub include_undated: bool,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            include_undated: true,
        }
    }
}

impl DateRange {
    /// Builds a range from raw operator input
    ///
    /// Empty strings count as "not given". Malformed bounds become `None`
    /// and are reported in the returned warnings. `include_undated`
    /// defaults to true when not given.
    pub fn from_operator(
        date_from: Option<&str>,
        date_to: Option<&str>,
        include_undated: Option<&str>,
    ) -> (Self, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();

        let from = operator_bound("date_from", date_from, &mut warnings);
        let to = operator_bound("date_to", date_to, &mut warnings);

        let include_undated = match include_undated.map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(token) => {
                let (value, recognized) = parse_include_undated(token);
                if !recognized {
                    warnings.push(ConfigWarning::UnrecognizedFlag {
                        field: "include_undated",
                        value: token.to_string(),
                    });
                }
                value
            }
        };

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                warnings.push(ConfigWarning::InvertedRange { from, to });
            }
        }

        (
            Self {
                from,
                to,
                include_undated,
            },
            warnings,
        )
    }

    /// Returns true if a notice posted on `date` falls outside this range
    pub fn excludes(&self, date: Option<NaiveDate>) -> bool {
        is_excluded(date, self)
    }
}

fn operator_bound(
    field: &'static str,
    raw: Option<&str>,
    warnings: &mut Vec<ConfigWarning>,
) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    let parsed = parse_operator_date(raw);
    if parsed.is_none() {
        warnings.push(ConfigWarning::MalformedBound {
            field,
            value: raw.to_string(),
        });
    }
    parsed
}

/// Decides whether a notice is filtered out by `range`
///
/// Undated notices follow `include_undated`. Dated notices are excluded when
/// they fall before `from` or after `to`; both bounds are inclusive. An
/// inverted range therefore excludes every dated notice.
pub fn is_excluded(date: Option<NaiveDate>, range: &DateRange) -> bool {
    let Some(date) = date else {
        return !range.include_undated;
    };

    if range.from.is_some_and(|from| date < from) {
        return true;
    }
    if range.to.is_some_and(|to| date > to) {
        return true;
    }
    false
}

/// Interprets a boolean-like token
///
/// Returns the value and whether the token was recognized. Only the truthy
/// set (`y`, `yes`, `true`, `1`, any case) maps to true.
pub fn parse_include_undated(token: &str) -> (bool, bool) {
    let token = token.trim().to_lowercase();
    if TRUTHY.contains(&token.as_str()) {
        (true, true)
    } else {
        (false, FALSY.contains(&token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn august() -> DateRange {
        DateRange {
            from: Some(ymd(2025, 8, 1)),
            to: Some(ymd(2025, 8, 31)),
            include_undated: true,
        }
    }

    #[test]
    fn test_undated_follows_policy() {
        let mut range = DateRange::default();
        range.include_undated = false;
        assert!(is_excluded(None, &range));

        range.include_undated = true;
        assert!(!is_excluded(None, &range));
    }

    #[test]
    fn test_dated_inside_range() {
        assert!(!is_excluded(Some(ymd(2025, 8, 15)), &august()));
    }

    #[test]
    fn test_dated_after_upper_bound() {
        let range = DateRange {
            to: Some(ymd(2025, 8, 10)),
            ..august()
        };
        assert!(is_excluded(Some(ymd(2025, 8, 15)), &range));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = august();
        assert!(!range.excludes(Some(ymd(2025, 8, 1))));
        assert!(!range.excludes(Some(ymd(2025, 8, 31))));
        assert!(range.excludes(Some(ymd(2025, 7, 31))));
        assert!(range.excludes(Some(ymd(2025, 9, 1))));
    }

    #[test]
    fn test_open_bounds() {
        let range = DateRange::default();
        assert!(!range.excludes(Some(ymd(1999, 1, 1))));
        assert!(!range.excludes(Some(ymd(2099, 12, 31))));
    }

    #[test]
    fn test_inverted_range_accepts_no_dates() {
        let range = DateRange {
            from: Some(ymd(2025, 9, 1)),
            to: Some(ymd(2025, 8, 1)),
            include_undated: true,
        };
        assert!(range.excludes(Some(ymd(2025, 8, 15))));
        assert!(range.excludes(Some(ymd(2025, 9, 1))));
        assert!(!range.excludes(None));
    }

    #[test]
    fn test_from_operator_valid() {
        let (range, warnings) =
            DateRange::from_operator(Some("2025-08-01"), Some("2025-08-31"), Some("no"));
        assert!(warnings.is_empty());
        assert_eq!(range.from, Some(ymd(2025, 8, 1)));
        assert_eq!(range.to, Some(ymd(2025, 8, 31)));
        assert!(!range.include_undated);
    }

    #[test]
    fn test_from_operator_defaults() {
        let (range, warnings) = DateRange::from_operator(None, Some(""), None);
        assert!(warnings.is_empty());
        assert_eq!(range, DateRange::default());
    }

    #[test]
    fn test_from_operator_malformed_bound_warns() {
        let (range, warnings) = DateRange::from_operator(Some("2025/08/01"), None, None);
        assert_eq!(range.from, None);
        assert_eq!(
            warnings,
            vec![ConfigWarning::MalformedBound {
                field: "date_from",
                value: "2025/08/01".to_string(),
            }]
        );
    }

    #[test]
    fn test_from_operator_inverted_range_warns() {
        let (_, warnings) =
            DateRange::from_operator(Some("2025-09-01"), Some("2025-08-01"), None);
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::InvertedRange { .. }]
        ));
    }

    #[test]
    fn test_from_operator_unknown_flag_warns() {
        let (range, warnings) = DateRange::from_operator(None, None, Some("maybe"));
        assert!(!range.include_undated);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_parse_include_undated() {
        assert_eq!(parse_include_undated("YES"), (true, true));
        assert_eq!(parse_include_undated("1"), (true, true));
        assert_eq!(parse_include_undated("y"), (true, true));
        assert_eq!(parse_include_undated("False"), (false, true));
        assert_eq!(parse_include_undated("off"), (false, false));
    }

    #[test]
    fn test_warning_messages() {
        let warning = ConfigWarning::MalformedBound {
            field: "date_to",
            value: "tomorrow".to_string(),
        };
        assert!(warning.to_string().contains("date_to"));
        assert!(warning.to_string().contains("tomorrow"));
    }
}
