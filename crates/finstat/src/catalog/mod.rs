//! Metric catalog.
//!
//! The 264 metric slots of a report are grouped into statement sections.
//! Slots are 1-based and match the metric column names of a report table.

pub mod metrics;

use finstat_data::{CODE_COLUMN, DATE_COLUMN, metric_column_name};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a section name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown metric section: {0}")]
pub struct UnknownSectionError(pub String);

/// Statement sections of the metric block (14 sections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricSection {
    /// Per-share indicators
    PerShare,

    /// Balance sheet
    BalanceSheet,

    /// Income statement
    IncomeStatement,

    /// Cash-flow statement
    CashFlow,

    /// Solvency analysis
    Solvency,

    /// Operating efficiency analysis
    Efficiency,

    /// Growth analysis
    Growth,

    /// Profitability analysis
    Profitability,

    /// Capital structure analysis
    CapitalStructure,

    /// Cash-flow analysis
    CashFlowAnalysis,

    /// Single-quarter figures
    SingleQuarter,

    /// Share capital and holders
    Shareholders,

    /// Institutional holdings
    Institutional,

    /// Metrics added after the original layout
    Supplementary,
}

impl MetricSection {
    /// Returns all sections in slot order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::PerShare,
            Self::BalanceSheet,
            Self::IncomeStatement,
            Self::CashFlow,
            Self::Solvency,
            Self::Efficiency,
            Self::Growth,
            Self::Profitability,
            Self::CapitalStructure,
            Self::CashFlowAnalysis,
            Self::SingleQuarter,
            Self::Shareholders,
            Self::Institutional,
            Self::Supplementary,
        ]
    }

    /// Returns the full section name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PerShare => "Per-share indicators",
            Self::BalanceSheet => "Balance sheet",
            Self::IncomeStatement => "Income statement",
            Self::CashFlow => "Cash-flow statement",
            Self::Solvency => "Solvency",
            Self::Efficiency => "Operating efficiency",
            Self::Growth => "Growth",
            Self::Profitability => "Profitability",
            Self::CapitalStructure => "Capital structure",
            Self::CashFlowAnalysis => "Cash-flow analysis",
            Self::SingleQuarter => "Single-quarter figures",
            Self::Shareholders => "Share capital and holders",
            Self::Institutional => "Institutional holdings",
            Self::Supplementary => "Supplementary",
        }
    }

    /// Returns the short name accepted by [`FromStr`].
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::PerShare => "per-share",
            Self::BalanceSheet => "balance-sheet",
            Self::IncomeStatement => "income-statement",
            Self::CashFlow => "cash-flow",
            Self::Solvency => "solvency",
            Self::Efficiency => "efficiency",
            Self::Growth => "growth",
            Self::Profitability => "profitability",
            Self::CapitalStructure => "capital-structure",
            Self::CashFlowAnalysis => "cash-flow-analysis",
            Self::SingleQuarter => "single-quarter",
            Self::Shareholders => "shareholders",
            Self::Institutional => "institutional",
            Self::Supplementary => "supplementary",
        }
    }

    /// Returns the inclusive range of 1-based metric slots.
    pub const fn range(&self) -> RangeInclusive<usize> {
        match self {
            Self::PerShare => 1..=7,
            Self::BalanceSheet => 8..=73,
            Self::IncomeStatement => 74..=97,
            Self::CashFlow => 98..=158,
            Self::Solvency => 159..=171,
            Self::Efficiency => 172..=182,
            Self::Growth => 183..=192,
            Self::Profitability => 193..=209,
            Self::CapitalStructure => 210..=218,
            Self::CashFlowAnalysis => 219..=229,
            Self::SingleQuarter => 230..=237,
            Self::Shareholders => 238..=245,
            Self::Institutional => 246..=263,
            Self::Supplementary => 264..=264,
        }
    }

    /// Section holding the 1-based metric slot `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|section| section.range().contains(&index))
    }

    /// Column names of the section's metrics.
    pub fn columns(&self) -> Vec<String> {
        self.range().map(metric_column).collect()
    }
}

impl fmt::Display for MetricSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MetricSection {
    type Err = UnknownSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::all()
            .into_iter()
            .find(|section| section.slug() == wanted)
            .ok_or_else(|| UnknownSectionError(s.to_string()))
    }
}

/// Column name of the 1-based metric slot `index`.
pub fn metric_column(index: usize) -> String {
    metric_column_name(index)
}

/// Project a report table onto `code`, `date` and one section's metrics.
pub fn select_section(df: &DataFrame, section: MetricSection) -> PolarsResult<DataFrame> {
    let mut exprs = vec![col(CODE_COLUMN), col(DATE_COLUMN)];
    exprs.extend(section.columns().into_iter().map(col));
    df.clone().lazy().select(exprs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_sections() {
        assert_eq!(MetricSection::all().len(), 14);
    }

    #[test]
    fn test_sections_tile_metric_block() {
        let mut next = 1;
        for section in MetricSection::all() {
            let range = section.range();
            assert_eq!(*range.start(), next, "{section} starts out of order");
            next = range.end() + 1;
        }
        assert_eq!(next, 265);
    }

    #[rstest]
    #[case(1, Some(MetricSection::PerShare))]
    #[case(7, Some(MetricSection::PerShare))]
    #[case(8, Some(MetricSection::BalanceSheet))]
    #[case(95, Some(MetricSection::IncomeStatement))]
    #[case(158, Some(MetricSection::CashFlow))]
    #[case(263, Some(MetricSection::Institutional))]
    #[case(264, Some(MetricSection::Supplementary))]
    #[case(0, None)]
    #[case(265, None)]
    fn test_from_index(#[case] index: usize, #[case] expected: Option<MetricSection>) {
        assert_eq!(MetricSection::from_index(index), expected);
    }

    #[rstest]
    #[case("balance-sheet", MetricSection::BalanceSheet)]
    #[case("Balance_Sheet", MetricSection::BalanceSheet)]
    #[case("cash flow analysis", MetricSection::CashFlowAnalysis)]
    #[case("supplementary", MetricSection::Supplementary)]
    fn test_from_str(#[case] text: &str, #[case] expected: MetricSection) {
        assert_eq!(text.parse::<MetricSection>(), Ok(expected));
    }

    #[test]
    fn test_from_str_unknown() {
        assert_eq!(
            "dividends".parse::<MetricSection>(),
            Err(UnknownSectionError("dividends".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(MetricSection::CashFlow.to_string(), "Cash-flow statement");
    }

    #[test]
    fn test_columns() {
        assert_eq!(
            MetricSection::PerShare.columns(),
            vec!["1", "2", "3", "4", "5", "6", "7"]
        );
        assert_eq!(metric_column(264), "264");
    }

    #[test]
    fn test_select_section() {
        let mut columns: Vec<Column> = vec![
            Series::new(CODE_COLUMN.into(), vec!["600000", "000001"]).into(),
            Series::new(DATE_COLUMN.into(), vec![20230331u32, 20230331]).into(),
        ];
        for index in 1..=264usize {
            let value = index as f64;
            columns.push(Series::new(metric_column(index).into(), vec![value, -value]).into());
        }
        let df = DataFrame::new(columns).unwrap();

        let selected = select_section(&df, MetricSection::Growth).unwrap();
        let names: Vec<String> = selected
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        assert_eq!(selected.height(), 2);
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], CODE_COLUMN);
        assert_eq!(names[2], "183");
        assert_eq!(names[11], "192");
        assert_eq!(selected.column("190").unwrap().f64().unwrap().get(1), Some(-190.0));
    }
}
