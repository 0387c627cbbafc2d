//! Report tables.
//!
//! Every table has the same schema for a given metric count: `code`
//! (String), `date` (UInt32, `YYYYMMDD`), then one Float64 column per metric
//! named `"1"`..`"N"`.

use finstat_format::DecodedRow;
use polars::prelude::*;

/// Identifier column name.
pub const CODE_COLUMN: &str = "code";

/// Reporting date column name.
pub const DATE_COLUMN: &str = "date";

/// Column name of the 1-based metric `index`.
pub fn metric_column_name(index: usize) -> String {
    index.to_string()
}

/// Build a table from decoded rows.
///
/// Rows shorter than `metric_count` are padded with `0.0`.
pub fn rows_to_frame(rows: &[DecodedRow], metric_count: usize) -> PolarsResult<DataFrame> {
    let codes: Vec<&str> = rows.iter().map(|row| row.identifier.as_str()).collect();
    let dates: Vec<u32> = rows.iter().map(|row| row.report_date.as_u32()).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(metric_count + 2);
    columns.push(Series::new(CODE_COLUMN.into(), codes).into());
    columns.push(Series::new(DATE_COLUMN.into(), dates).into());

    for slot in 0..metric_count {
        let values: Vec<f64> = rows
            .iter()
            .map(|row| row.metrics.get(slot).copied().unwrap_or(0.0))
            .collect();
        columns.push(Series::new(metric_column_name(slot + 1).into(), values).into());
    }

    DataFrame::new(columns)
}

/// A table with the full schema and no rows.
pub fn empty_frame(metric_count: usize) -> PolarsResult<DataFrame> {
    rows_to_frame(&[], metric_count)
}

/// Append-only accumulator of per-date tables.
#[derive(Debug, Clone)]
pub struct ReportTableBuilder {
    metric_count: usize,
    frames: Vec<DataFrame>,
    rows: usize,
}

impl ReportTableBuilder {
    /// Start an empty accumulator for tables with `metric_count` metrics.
    pub const fn new(metric_count: usize) -> Self {
        Self {
            metric_count,
            frames: Vec::new(),
            rows: 0,
        }
    }

    /// Append a table below the ones already collected.
    pub fn push(&mut self, frame: DataFrame) {
        self.rows += frame.height();
        self.frames.push(frame);
    }

    /// Number of tables appended so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total number of rows appended so far.
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Stack the collected tables vertically.
    pub fn finish(self) -> PolarsResult<DataFrame> {
        if self.frames.is_empty() {
            return empty_frame(self.metric_count);
        }
        let frames: Vec<LazyFrame> = self.frames.into_iter().map(|frame| frame.lazy()).collect();
        concat(frames, UnionArgs::default())?.collect()
    }
}
