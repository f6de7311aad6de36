//! Chart date tokens and caller input validation.
//!
//! Snapshot identifiers are either dashed dates (`YYYY-MM-DD`) or the
//! `today` sentinel used by sources that only publish a current chart.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::ChartError;

/// Sentinel identifier for a source's current (unarchived) chart.
pub const TODAY_TOKEN: &str = "today";

/// Earliest year any source covers.
pub const FLOOR_YEAR: i32 = 1970;

/// One available snapshot date as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDate {
    pub date: String,
    #[serde(rename = "formattedDate")]
    pub formatted_date: String,
}

impl ChartDate {
    pub fn new(date: impl Into<String>, formatted_date: impl Into<String>) -> Self {
        ChartDate {
            date: date.into(),
            formatted_date: formatted_date.into(),
        }
    }

    /// The `today` entry shown for current-chart sources.
    pub fn today() -> Self {
        ChartDate::new(TODAY_TOKEN, "Today")
    }
}

fn dashed_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Parse and range-check a caller-supplied year.
pub fn validate_year(year: &str) -> Result<i32, ChartError> {
    let parsed: i32 = year
        .trim()
        .parse()
        .map_err(|_| ChartError::Validation(format!("year '{}' is not a number", year)))?;
    let max = Utc::now().year() + 1;
    if parsed < FLOOR_YEAR || parsed > max {
        return Err(ChartError::Validation(format!(
            "year {} out of range ({}..={})",
            parsed, FLOOR_YEAR, max
        )));
    }
    Ok(parsed)
}

/// Check a caller-supplied date token: `YYYY-MM-DD` shape and a real
/// calendar date.
pub fn validate_date(date: &str) -> Result<(), ChartError> {
    if !dashed_date_re().is_match(date) {
        return Err(ChartError::Validation(format!(
            "date '{}' does not match YYYY-MM-DD",
            date
        )));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ChartError::Validation(format!("date '{}' is not a calendar date", date)))?;
    Ok(())
}

/// Convert a compact archive token (`YYYYMMDD`) to dashed form.
/// Returns None for anything that is not eight digits.
pub fn compact_to_dashed(token: &str) -> Option<String> {
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}-{}-{}",
        &token[0..4],
        &token[4..6],
        &token[6..8]
    ))
}

/// Render a dashed date as "Apr 6, 2024" for display.  Tokens that do
/// not parse (including the `today` sentinel) are returned unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_year_accepts_range() {
        assert_eq!(validate_year("1970").unwrap(), 1970);
        assert_eq!(validate_year("2024").unwrap(), 2024);
        assert_eq!(validate_year(" 2024 ").unwrap(), 2024);
    }

    #[test]
    fn test_validate_year_rejects_garbage() {
        assert!(matches!(
            validate_year("abc"),
            Err(ChartError::Validation(_))
        ));
        assert!(validate_year("1969").is_err());
        assert!(validate_year("9999").is_err());
        assert!(validate_year("").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-04-06").is_ok());
        assert!(validate_date("2024-4-6").is_err());
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("today").is_err());
    }

    #[test]
    fn test_compact_to_dashed() {
        assert_eq!(compact_to_dashed("20240406").unwrap(), "2024-04-06");
        assert!(compact_to_dashed("2024046").is_none());
        assert!(compact_to_dashed("2024040a").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-04-06"), "Apr 6, 2024");
        assert_eq!(format_date("today"), "today");
    }
}
