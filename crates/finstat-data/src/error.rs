//! Error types for extraction and aggregation.

use crate::archive::zip::ZipError;
use crate::config::ConfigError;
use finstat_format::{DecodeError, ParseReportDateError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Errors that can occur while extracting a report archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No archive exists for the requested date
    #[error("Report archive not found: {}", path.display())]
    NotFound {
        /// Path the archive was expected at
        path: PathBuf,
    },

    /// The archive could not be opened as a zip container
    #[error("Corrupt report archive {}: {source}", path.display())]
    CorruptArchive {
        /// Archive path
        path: PathBuf,
        /// Underlying container error
        source: ZipError,
    },

    /// The archive holds no entry with the data extension
    #[error("No .{extension} entry in {}", path.display())]
    NoMatchingEntry {
        /// Archive path
        path: PathBuf,
        /// Extension that was searched for
        extension: String,
    },

    /// The data entry could not be decompressed
    #[error("Failed to read entry {entry} of {}: {source}", path.display())]
    EntryReadFailure {
        /// Archive path
        path: PathBuf,
        /// Name of the entry being read
        entry: String,
        /// Underlying container error
        source: ZipError,
    },
}

/// Errors that can occur while collecting reports across dates.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The report directory could not be listed
    #[error("Cannot read report directory {}: {source}", path.display())]
    DirectoryUnreadable {
        /// Directory that was listed
        path: PathBuf,
        /// IO error from the listing
        source: std::io::Error,
    },

    /// The requested date has no archive in the report directory
    #[error("Report date {0} is not available")]
    UnknownDate(String),

    /// A discovered or requested date is not a valid `YYYYMMDD` value
    #[error(transparent)]
    InvalidDate(#[from] ParseReportDateError),

    /// Archive extraction error
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Report decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
