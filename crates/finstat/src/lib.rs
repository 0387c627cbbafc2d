#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalog;

// Re-export main types from sub-crates
pub use finstat_data as data;
pub use finstat_format as format;

pub use catalog::{MetricSection, metric_column, select_section};
pub use finstat_data::{AggregateError, ReportCollector, ReportPaths, list_reports};
pub use finstat_format::{DecodedRow, ReportDate, ReportDecoder, ReportLayout};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
