#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod archive;
pub mod collect;
pub mod config;
pub mod discovery;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod table;

pub use archive::ArchiveExtractor;
pub use collect::{ReportCollector, list_reports};
pub use config::{ConfigError, ReportPaths, default_data_dir};
pub use discovery::{DirectoryListing, ListedEntry, LocalDirectory};
pub use error::{AggregateError, ExtractError, Result};
pub use table::{CODE_COLUMN, DATE_COLUMN, ReportTableBuilder, metric_column_name};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
