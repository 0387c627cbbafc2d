//! Report buffer decoding.
//!
//! A buffer is decoded in one pass: the header and the whole item table are
//! validated up front, then each selected descriptor's metric block is read
//! through its offset. A block outside the buffer only drops that record.

use crate::date::ReportDate;
use crate::error::{DecodeError, Result};
use crate::layout::ReportLayout;
use crate::record::{DecodedRow, ItemDescriptor, MetricBlock, RecordHeader};
use tracing::{debug, warn};

/// A record dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Identifier of the dropped record
    pub identifier: String,
    /// Why it was dropped
    pub error: DecodeError,
}

/// Rows decoded from one buffer plus the records that had to be dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodeReport {
    /// Decoded rows in item-table order
    pub rows: Vec<DecodedRow>,
    /// Records whose metric block could not be read
    pub skipped: Vec<SkippedRecord>,
}

/// Decoder for one layout version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportDecoder {
    layout: ReportLayout,
}

impl ReportDecoder {
    /// Create a decoder for `layout`.
    pub const fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    /// The layout this decoder reads.
    pub const fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Read the record header.
    pub fn read_header(&self, buffer: &[u8]) -> Result<RecordHeader> {
        let needed = self.layout.header_size();
        let bytes = buffer.get(..needed).ok_or(DecodeError::TruncatedHeader {
            needed,
            actual: buffer.len(),
        })?;
        Ok(RecordHeader::parse(bytes))
    }

    /// Read every item descriptor.
    ///
    /// The full table range is checked against the buffer before the first
    /// descriptor is read, so an inflated record count fails without reading
    /// past the end.
    pub fn read_descriptors(&self, buffer: &[u8]) -> Result<Vec<ItemDescriptor>> {
        let header = self.read_header(buffer)?;
        let needed = self.layout.item_table_end(header.record_count);
        if needed.is_none_or(|end| end > buffer.len()) {
            return Err(DecodeError::TruncatedItemTable {
                record_count: header.record_count,
                needed,
                actual: buffer.len(),
            });
        }

        let item_size = self.layout.item_descriptor_size();
        let start = self.layout.header_size();
        let items = buffer[start..]
            .chunks_exact(item_size)
            .take(header.record_count as usize)
            .enumerate()
            .map(|(index, bytes)| ItemDescriptor::parse(index, bytes))
            .collect();

        Ok(items)
    }

    /// Read the metric block a descriptor points to.
    pub fn read_block(&self, buffer: &[u8], item: &ItemDescriptor) -> Result<MetricBlock> {
        let block_size = self.layout.block_size();
        let range = item
            .block_range(block_size, buffer.len())
            .ok_or_else(|| DecodeError::InvalidBlockOffset {
                identifier: item.identifier.clone(),
                offset: item.block_offset,
                block_size,
                buffer_len: buffer.len(),
            })?;
        Ok(MetricBlock::parse(&buffer[range]))
    }

    /// Decode a buffer, keeping track of dropped records.
    ///
    /// With `identifier_filter` set only descriptors whose identifier equals
    /// it exactly are decoded; no match is an empty report, not an error.
    pub fn decode_detailed(
        &self,
        buffer: &[u8],
        identifier_filter: Option<&str>,
        report_date: ReportDate,
    ) -> Result<DecodeReport> {
        let items = self.read_descriptors(buffer)?;
        let mut report = DecodeReport::default();

        for item in items
            .into_iter()
            .filter(|item| identifier_filter.is_none_or(|code| item.identifier == code))
        {
            match self.read_block(buffer, &item) {
                Ok(block) => report.rows.push(DecodedRow {
                    identifier: item.identifier,
                    report_date,
                    metrics: block.normalized(),
                }),
                Err(error) => {
                    warn!(
                        date = %report_date,
                        index = item.index,
                        "Skipping record: {}",
                        error
                    );
                    report.skipped.push(SkippedRecord {
                        identifier: item.identifier,
                        error,
                    });
                }
            }
        }

        debug!(
            date = %report_date,
            rows = report.rows.len(),
            skipped = report.skipped.len(),
            "Decoded report buffer"
        );

        Ok(report)
    }

    /// Decode a buffer into rows, dropping records with unreadable blocks.
    pub fn decode(
        &self,
        buffer: &[u8],
        identifier_filter: Option<&str>,
        report_date: ReportDate,
    ) -> Result<Vec<DecodedRow>> {
        self.decode_detailed(buffer, identifier_filter, report_date)
            .map(|report| report.rows)
    }
}

/// Decode a buffer in the standard layout.
pub fn decode_buffer(
    buffer: &[u8],
    identifier_filter: Option<&str>,
    report_date: ReportDate,
) -> Result<Vec<DecodedRow>> {
    ReportDecoder::default().decode(buffer, identifier_filter, report_date)
}
