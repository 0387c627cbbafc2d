//! In-memory report buffers for tests.
//!
//! Enabled with the `fixtures` feature. Blocks are appended after the item
//! table in insertion order unless an explicit offset is given.

use crate::layout::{IDENTIFIER_LEN, ReportLayout};

/// Raw value used by published reports for "not reported".
pub const SENTINEL: f64 = -99999999999999.0;

#[derive(Debug, Clone)]
struct Entry {
    identifier: [u8; IDENTIFIER_LEN],
    offset: Option<u32>,
    metrics: Vec<f64>,
}

/// Builder for report buffers in the standard wire layout.
#[derive(Debug, Clone)]
pub struct ReportBufferBuilder {
    layout: ReportLayout,
    entries: Vec<Entry>,
    record_count: Option<u32>,
}

impl ReportBufferBuilder {
    /// Start an empty buffer for `layout`.
    pub const fn new(layout: ReportLayout) -> Self {
        Self {
            layout,
            entries: Vec::new(),
            record_count: None,
        }
    }

    /// Add a record whose block is placed after the item table.
    ///
    /// `metrics` is padded with zeros or truncated to the layout's metric count.
    pub fn record(mut self, identifier: &str, metrics: &[f64]) -> Self {
        self.entries.push(Entry {
            identifier: pad_identifier(identifier),
            offset: None,
            metrics: self.fit(metrics),
        });
        self
    }

    /// Add a record whose descriptor stores `offset` verbatim and has no block.
    pub fn record_at(mut self, identifier: &str, offset: u32) -> Self {
        self.entries.push(Entry {
            identifier: pad_identifier(identifier),
            offset: Some(offset),
            metrics: Vec::new(),
        });
        self
    }

    /// Override the record count written to the header.
    pub const fn claim_records(mut self, record_count: u32) -> Self {
        self.record_count = Some(record_count);
        self
    }

    /// Serialize the buffer.
    pub fn build(self) -> Vec<u8> {
        let header_size = self.layout.header_size();
        let table_end = header_size + self.entries.len() * self.layout.item_descriptor_size();
        let record_count = self
            .record_count
            .unwrap_or_else(|| u32::try_from(self.entries.len()).unwrap_or(u32::MAX));

        let mut buf = vec![0u8; table_end];
        buf[..4].copy_from_slice(&record_count.to_le_bytes());

        let mut blocks = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let offset = entry.offset.unwrap_or_else(|| {
                let offset = table_end + blocks.len();
                blocks.extend(entry.metrics.iter().flat_map(|v| v.to_le_bytes()));
                u32::try_from(offset).unwrap_or(u32::MAX)
            });

            let start = header_size + i * self.layout.item_descriptor_size();
            buf[start..start + IDENTIFIER_LEN].copy_from_slice(&entry.identifier);
            buf[start + IDENTIFIER_LEN..start + IDENTIFIER_LEN + 4]
                .copy_from_slice(&offset.to_le_bytes());
        }

        buf.extend(blocks);
        buf
    }

    fn fit(&self, metrics: &[f64]) -> Vec<f64> {
        let mut values = metrics.to_vec();
        values.resize(self.layout.metric_count(), 0.0);
        values
    }
}

fn pad_identifier(identifier: &str) -> [u8; IDENTIFIER_LEN] {
    let mut out = [0u8; IDENTIFIER_LEN];
    let bytes = identifier.as_bytes();
    let n = bytes.len().min(IDENTIFIER_LEN);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}
