//! Byte layout of a report buffer.
//!
//! ```text
//! 0                 record_count (u32 LE)
//! header_size       item[0]: identifier (6 bytes) + block_offset (u32 LE)
//! header_size + 10  item[1] ...
//! block_offset      metric[0..metric_count] (f64 LE)
//! ```

use crate::error::{DecodeError, Result};

/// Width of the identifier field in an item descriptor.
pub const IDENTIFIER_LEN: usize = 6;

/// Size of one item descriptor: identifier plus a `u32` block offset.
pub const ITEM_DESCRIPTOR_SIZE: usize = IDENTIFIER_LEN + 4;

/// Header size of the standard layout.
pub const STANDARD_HEADER_SIZE: usize = 4;

/// Number of metric slots in the standard layout.
pub const STANDARD_METRIC_COUNT: usize = 264;

/// Size of one metric value on the wire.
pub const METRIC_SIZE: usize = 8;

/// Raw values below this threshold mean "not reported".
pub const NULL_SENTINEL_THRESHOLD: f64 = -1e13;

/// Size parameters of one layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    header_size: usize,
    metric_count: usize,
}

impl ReportLayout {
    /// The layout used by published report archives.
    pub const STANDARD: Self = Self {
        header_size: STANDARD_HEADER_SIZE,
        metric_count: STANDARD_METRIC_COUNT,
    };

    /// Create a layout with a custom header size and metric count.
    ///
    /// The header must be large enough for the record count and at least one
    /// metric is required.
    pub fn new(header_size: usize, metric_count: usize) -> Result<Self> {
        if header_size < 4 {
            return Err(DecodeError::InvalidLayout(format!(
                "header size {header_size} cannot hold the record count"
            )));
        }
        if metric_count == 0 {
            return Err(DecodeError::InvalidLayout(
                "metric count must be positive".to_string(),
            ));
        }
        if metric_count.checked_mul(METRIC_SIZE).is_none() {
            return Err(DecodeError::InvalidLayout(format!(
                "metric count {metric_count} overflows the block size"
            )));
        }

        Ok(Self {
            header_size,
            metric_count,
        })
    }

    /// Size of the record header in bytes.
    pub const fn header_size(&self) -> usize {
        self.header_size
    }

    /// Number of metrics per block.
    pub const fn metric_count(&self) -> usize {
        self.metric_count
    }

    /// Size of one item descriptor in bytes.
    pub const fn item_descriptor_size(&self) -> usize {
        ITEM_DESCRIPTOR_SIZE
    }

    /// Size of one metric block in bytes.
    pub const fn block_size(&self) -> usize {
        self.metric_count * METRIC_SIZE
    }

    /// Offset of the `index`-th item descriptor.
    pub const fn item_offset(&self, index: usize) -> Option<usize> {
        match index.checked_mul(ITEM_DESCRIPTOR_SIZE) {
            Some(rel) => self.header_size.checked_add(rel),
            None => None,
        }
    }

    /// End of an item table holding `record_count` descriptors.
    pub const fn item_table_end(&self, record_count: u32) -> Option<usize> {
        self.item_offset(record_count as usize)
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}
