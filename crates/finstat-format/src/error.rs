//! Error types for report decoding.

use thiserror::Error;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while decoding a report buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer is shorter than the record header.
    #[error("Truncated header: need {needed} bytes, buffer has {actual}")]
    TruncatedHeader {
        /// Bytes required for the header
        needed: usize,
        /// Bytes available
        actual: usize,
    },

    /// The item table claimed by the header does not fit in the buffer.
    #[error(
        "Truncated item table: {record_count} records need {needed:?} bytes, buffer has {actual}"
    )]
    TruncatedItemTable {
        /// Record count read from the header
        record_count: u32,
        /// Bytes required for header plus item table, `None` on overflow
        needed: Option<usize>,
        /// Bytes available
        actual: usize,
    },

    /// A descriptor points at a metric block outside the buffer.
    #[error(
        "Invalid block offset for {identifier}: block at {offset} of {block_size} bytes exceeds buffer of {buffer_len} bytes"
    )]
    InvalidBlockOffset {
        /// Identifier of the offending record
        identifier: String,
        /// Offset stored in the descriptor
        offset: u32,
        /// Size of one metric block
        block_size: usize,
        /// Length of the buffer
        buffer_len: usize,
    },

    /// The layout parameters cannot describe a valid buffer.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

impl DecodeError {
    /// Whether the error affects a single record rather than the whole buffer.
    pub const fn is_per_record(&self) -> bool {
        matches!(self, Self::InvalidBlockOffset { .. })
    }
}
