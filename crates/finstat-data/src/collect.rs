//! Multi-date report collection.

use crate::archive::ArchiveExtractor;
use crate::config::ReportPaths;
use crate::discovery::{DirectoryListing, LocalDirectory, discover_dates};
use crate::error::{AggregateError, Result};
use crate::table::{ReportTableBuilder, rows_to_frame};
use finstat_format::{ReportDate, ReportDecoder, ReportLayout};
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

/// Collects report tables across the reporting dates of a report store.
#[derive(Debug, Clone)]
pub struct ReportCollector<L = LocalDirectory> {
    extractor: ArchiveExtractor,
    decoder: ReportDecoder,
    listing: L,
}

impl ReportCollector {
    /// Collector over the local filesystem in the standard layout.
    pub fn new(paths: ReportPaths) -> Self {
        Self::with_listing(paths, LocalDirectory)
    }
}

impl<L: DirectoryListing> ReportCollector<L> {
    /// Collector using `listing` for date discovery.
    pub fn with_listing(paths: ReportPaths, listing: L) -> Self {
        Self {
            extractor: ArchiveExtractor::new(paths),
            decoder: ReportDecoder::default(),
            listing,
        }
    }

    /// Decode with `layout` instead of the standard layout.
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.decoder = ReportDecoder::new(layout);
        self
    }

    /// The configured paths.
    pub fn paths(&self) -> &ReportPaths {
        self.extractor.paths()
    }

    /// Date texts of the archives in the report directory, in listing order.
    pub fn available_dates(&self) -> Result<Vec<String>> {
        let dir = self.paths().report_directory();
        let entries = self
            .listing
            .list(&dir)
            .map_err(|source| AggregateError::DirectoryUnreadable { path: dir, source })?;
        Ok(discover_dates(&entries, self.paths().prefix_len()))
    }

    /// Extract and decode the report of one date.
    pub fn collect_date(
        &self,
        identifier_filter: Option<&str>,
        date: ReportDate,
    ) -> Result<DataFrame> {
        let buffer = self.extractor.open(date)?;
        let rows = self.decoder.decode(&buffer, identifier_filter, date)?;
        debug!(date = %date, rows = rows.len(), "Collected report date");
        Ok(rows_to_frame(&rows, self.decoder.layout().metric_count())?)
    }

    /// Collect reports into one table.
    ///
    /// With `report_date` set, that date must be available and any failure
    /// is returned. Without it every available date is attempted in order
    /// and failing dates are skipped.
    pub fn collect(
        &self,
        identifier_filter: Option<&str>,
        report_date: Option<&str>,
    ) -> Result<DataFrame> {
        let dates = self.available_dates()?;
        let mut builder = ReportTableBuilder::new(self.decoder.layout().metric_count());

        match report_date {
            Some(requested) => {
                if !dates.iter().any(|date| date == requested) {
                    return Err(AggregateError::UnknownDate(requested.to_string()));
                }
                let date: ReportDate = requested.parse()?;
                builder.push(self.collect_date(identifier_filter, date)?);
            }
            None => {
                let mut skipped = 0usize;
                for text in &dates {
                    let outcome = text
                        .parse::<ReportDate>()
                        .map_err(AggregateError::from)
                        .and_then(|date| self.collect_date(identifier_filter, date));
                    match outcome {
                        Ok(frame) => builder.push(frame),
                        Err(e) => {
                            warn!(date = %text, "Skipping report date: {}", e);
                            skipped += 1;
                        }
                    }
                }
                info!(
                    dates = dates.len(),
                    skipped,
                    rows = builder.row_count(),
                    "Collected reports"
                );
            }
        }

        Ok(builder.finish()?)
    }
}

/// Collect reports from the local store at `paths`.
///
/// Empty `code` or `date` means unspecified.
pub fn list_reports(paths: &ReportPaths, code: &str, date: &str) -> Result<DataFrame> {
    let filter = (!code.is_empty()).then_some(code);
    let date = (!date.is_empty()).then_some(date);
    ReportCollector::new(paths.clone()).collect(filter, date)
}
