//! Reporting dates in `YYYYMMDD` form.

use chrono::{Datelike, NaiveDate};
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when text or an integer is not a valid `YYYYMMDD` date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid report date: {0:?} (expected YYYYMMDD)")]
pub struct ParseReportDateError(pub String);

/// The calendar date a batch of financial statements is published under.
///
/// Displays and serializes as the integer `YYYYMMDD`. The year is limited to
/// `0..=9999` so that the text form always has eight digits.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{}", _0.format("%Y%m%d"))]
#[serde(try_from = "u32", into = "u32")]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Largest representable year.
    pub const MAX_YEAR: i32 = 9999;

    /// Wrap a calendar date, or `None` if its year is outside `0..=9999`.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        (0..=Self::MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    /// Create a report date from calendar components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::from_date)
    }

    /// Create a report date from its `YYYYMMDD` integer form.
    pub fn from_u32(value: u32) -> Option<Self> {
        let year = i32::try_from(value / 10_000).ok()?;
        Self::from_ymd(year, (value / 100) % 100, value % 100)
    }

    /// The `YYYYMMDD` integer form.
    pub fn as_u32(&self) -> u32 {
        let year = self.0.year().unsigned_abs();
        year * 10_000 + self.0.month() * 100 + self.0.day()
    }

    /// The underlying calendar date.
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ReportDate {
    type Err = ParseReportDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseReportDateError(s.to_string()));
        }

        s.parse::<u32>()
            .ok()
            .and_then(Self::from_u32)
            .ok_or_else(|| ParseReportDateError(s.to_string()))
    }
}

impl TryFrom<u32> for ReportDate {
    type Error = ParseReportDateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or_else(|| ParseReportDateError(value.to_string()))
    }
}

impl TryFrom<NaiveDate> for ReportDate {
    type Error = ParseReportDateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_date(date).ok_or_else(|| ParseReportDateError(date.to_string()))
    }
}

impl From<ReportDate> for u32 {
    fn from(date: ReportDate) -> Self {
        date.as_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_and_display() {
        let date: ReportDate = "20230331".parse().unwrap();
        assert_eq!(date.as_u32(), 20230331);
        assert_eq!(date.to_string(), "20230331");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("2023033")]
    #[case("202303311")]
    #[case("2023-3-31")]
    #[case("20230230")]
    #[case("20231301")]
    #[case("+2023033")]
    fn test_rejects_invalid_text(#[case] text: &str) {
        assert!(text.parse::<ReportDate>().is_err());
    }

    #[test]
    fn test_integer_round_trip() {
        let date = ReportDate::from_u32(19991231).unwrap();
        assert_eq!(u32::from(date), 19991231);
        assert!(ReportDate::from_u32(20230000).is_none());
        assert!(ReportDate::try_from(0u32).is_err());
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(9999, true)]
    #[case(10000, false)]
    fn test_year_range(#[case] year: i32, #[case] accepted: bool) {
        assert_eq!(ReportDate::from_ymd(year, 1, 1).is_some(), accepted);

        let naive = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let wrapped = ReportDate::try_from(naive);
        assert_eq!(wrapped.is_ok(), accepted);
        if let Ok(date) = wrapped {
            assert_eq!(date.to_string().len(), 8);
            assert_eq!(date.as_u32() / 10_000, year.unsigned_abs());
            assert_eq!(NaiveDate::from(date), naive);
        }
    }

    #[test]
    fn test_integer_beyond_year_range() {
        assert!(ReportDate::from_u32(100_000_101).is_none());
        assert!(ReportDate::try_from(u32::MAX).is_err());
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let q1 = ReportDate::from_ymd(2023, 3, 31).unwrap();
        let q4 = ReportDate::from_ymd(2022, 12, 31).unwrap();
        assert!(q4 < q1);
    }

    #[test]
    fn test_serde_as_integer() {
        let date = ReportDate::from_ymd(2024, 6, 30).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "20240630");

        let back: ReportDate = serde_json::from_str("20240630").unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<ReportDate>("20240631").is_err());
    }
}
