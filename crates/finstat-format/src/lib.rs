#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod date;
pub mod decoder;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod layout;
pub mod record;

pub use date::{ParseReportDateError, ReportDate};
pub use decoder::{DecodeReport, ReportDecoder, SkippedRecord, decode_buffer};
pub use error::{DecodeError, Result};
pub use layout::{
    IDENTIFIER_LEN, ITEM_DESCRIPTOR_SIZE, NULL_SENTINEL_THRESHOLD, ReportLayout,
    STANDARD_HEADER_SIZE, STANDARD_METRIC_COUNT,
};
pub use record::{DecodedRow, ItemDescriptor, MetricBlock, RecordHeader, normalize_metric};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
