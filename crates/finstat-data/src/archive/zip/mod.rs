//! Minimal zip container reader.
//!
//! The reader locates the end of central directory record at the file tail,
//! lists entries from the central directory and decompresses single entries
//! into memory. STORED and DEFLATE entries are supported, ZIP64 size and
//! offset fields are honored. Encryption and multi-disk archives are not.

mod reader;
mod structures;


pub use reader::ZipReader;
pub use structures::{
    CDFH_MIN_SIZE, CDFH_SIGNATURE, CompressionMethod, EndOfCentralDirectory, LFH_SIGNATURE,
    LFH_SIZE, Zip64EndOfCentralDirectory, Zip64Locator, ZipEntry,
};

use thiserror::Error;

/// Errors raised by the zip reader.
#[derive(Debug, Error)]
pub enum ZipError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural damage in the container
    #[error("Corrupt zip container: {0}")]
    Corrupt(String),

    /// Compression method other than STORED or DEFLATE
    #[error("Unsupported compression method {0}")]
    UnsupportedMethod(u16),

    /// Decompressed length differs from the central directory
    #[error("Size mismatch for {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Entry name
        name: String,
        /// Size recorded in the central directory
        expected: u64,
        /// Size produced by decompression
        actual: u64,
    },

    /// CRC-32 differs from the central directory
    #[error("Checksum mismatch for {name}: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Entry name
        name: String,
        /// CRC recorded in the central directory
        expected: u32,
        /// CRC of the decompressed data
        actual: u32,
    },
}
