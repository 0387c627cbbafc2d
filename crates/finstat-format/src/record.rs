//! Wire structures of a report buffer and the decoded row.
//!
//! The `parse` constructors take exactly-sized slices; bounds are checked by
//! [`ReportDecoder`](crate::ReportDecoder) before any of them is called.

use crate::date::ReportDate;
use crate::layout::{IDENTIFIER_LEN, ITEM_DESCRIPTOR_SIZE, METRIC_SIZE, NULL_SENTINEL_THRESHOLD};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Map a raw metric value to its decoded value.
///
/// Values below [`NULL_SENTINEL_THRESHOLD`] become `0.0`; everything else,
/// including NaN, passes through unchanged.
pub fn normalize_metric(raw: f64) -> f64 {
    if raw < NULL_SENTINEL_THRESHOLD {
        0.0
    } else {
        raw
    }
}

/// Fixed-size header at the start of a report buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Number of item descriptors following the header
    pub record_count: u32,
}

impl RecordHeader {
    /// Parse the header from its leading bytes.
    ///
    /// `bytes` must hold at least four bytes.
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            record_count: LittleEndian::read_u32(&bytes[..4]),
        }
    }
}

/// Per-security entry of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Position in the item table
    pub index: usize,
    /// Security code with padding removed
    pub identifier: String,
    /// Absolute offset of the metric block in the same buffer
    pub block_offset: u32,
}

impl ItemDescriptor {
    /// Parse a descriptor from exactly [`ITEM_DESCRIPTOR_SIZE`] bytes.
    pub fn parse(index: usize, bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), ITEM_DESCRIPTOR_SIZE);
        Self {
            index,
            identifier: trim_identifier(&bytes[..IDENTIFIER_LEN]),
            block_offset: LittleEndian::read_u32(&bytes[IDENTIFIER_LEN..ITEM_DESCRIPTOR_SIZE]),
        }
    }

    /// Byte range of this record's metric block, if it fits in `buffer_len`.
    pub fn block_range(&self, block_size: usize, buffer_len: usize) -> Option<std::ops::Range<usize>> {
        let start = self.block_offset as usize;
        let end = start.checked_add(block_size)?;
        (end <= buffer_len).then_some(start..end)
    }
}

/// Identifier bytes up to the first NUL, right-trimmed of spaces.
fn trim_identifier(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
        .trim_end_matches([' ', '\0'])
        .to_string()
}

/// Raw metric values of one security.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBlock {
    values: Vec<f64>,
}

impl MetricBlock {
    /// Parse a block from a slice whose length is a multiple of eight.
    pub fn parse(bytes: &[u8]) -> Self {
        let mut values = vec![0.0; bytes.len() / METRIC_SIZE];
        LittleEndian::read_f64_into(&bytes[..values.len() * METRIC_SIZE], &mut values);
        Self { values }
    }

    /// Raw values, sentinels included.
    pub fn raw(&self) -> &[f64] {
        &self.values
    }

    /// Values with sentinels replaced by `0.0`.
    pub fn normalized(self) -> Vec<f64> {
        self.values.into_iter().map(normalize_metric).collect()
    }
}

/// One decoded security record for one reporting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedRow {
    /// Security code
    pub identifier: String,
    /// Reporting date the buffer was published under
    pub report_date: ReportDate,
    /// Metric values; metric `i` (1-based) is at `metrics[i - 1]`
    pub metrics: Vec<f64>,
}

impl DecodedRow {
    /// Metric by its 1-based catalog index.
    pub fn metric(&self, index: usize) -> Option<f64> {
        index.checked_sub(1).and_then(|i| self.metrics.get(i).copied())
    }
}
