//! Zip container records.

use super::ZipError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Compression method of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Stored without compression
    Stored,
    /// Raw DEFLATE stream
    Deflate,
    /// Any other method
    Unknown(u16),
}

impl CompressionMethod {
    /// Map the method field of a header.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Stored,
            8 => Self::Deflate,
            _ => Self::Unknown(value),
        }
    }

    /// The method field value.
    pub const fn as_u16(&self) -> u16 {
        match self {
            Self::Stored => 0,
            Self::Deflate => 8,
            Self::Unknown(v) => *v,
        }
    }
}

/// End of central directory record, 22 bytes without comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Number of entries in the central directory
    pub total_entries: u16,
    /// Size of the central directory
    pub cd_size: u32,
    /// Offset of the central directory
    pub cd_offset: u32,
    /// Length of the archive comment
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    /// Record signature.
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    /// Record size without comment.
    pub const SIZE: usize = 22;

    /// Parse the record from at least [`Self::SIZE`] bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ZipError> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ZipError::Corrupt(
                "invalid end of central directory".to_string(),
            ));
        }

        let mut cursor = Cursor::new(&data[4..]);
        let _disk_number = cursor.read_u16::<LittleEndian>()?;
        let _disk_with_cd = cursor.read_u16::<LittleEndian>()?;
        let _disk_entries = cursor.read_u16::<LittleEndian>()?;

        Ok(Self {
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }

    /// Whether any field is saturated and the ZIP64 record must be read.
    pub const fn is_zip64(&self) -> bool {
        self.total_entries == 0xFFFF || self.cd_size == 0xFFFF_FFFF || self.cd_offset == 0xFFFF_FFFF
    }
}

/// ZIP64 end of central directory locator, 20 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zip64Locator {
    /// Offset of the ZIP64 end of central directory record
    pub eocd64_offset: u64,
}

impl Zip64Locator {
    /// Record signature.
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    /// Record size.
    pub const SIZE: usize = 20;

    /// Parse the locator.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ZipError> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ZipError::Corrupt("invalid ZIP64 locator".to_string()));
        }

        let mut cursor = Cursor::new(&data[4..]);
        let _disk_with_eocd64 = cursor.read_u32::<LittleEndian>()?;
        Ok(Self {
            eocd64_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// ZIP64 end of central directory record, 56 bytes minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zip64EndOfCentralDirectory {
    /// Number of entries in the central directory
    pub total_entries: u64,
    /// Size of the central directory
    pub cd_size: u64,
    /// Offset of the central directory
    pub cd_offset: u64,
}

impl Zip64EndOfCentralDirectory {
    /// Record signature.
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    /// Minimum record size.
    pub const MIN_SIZE: usize = 56;

    /// Parse the record.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ZipError> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ZipError::Corrupt(
                "invalid ZIP64 end of central directory".to_string(),
            ));
        }

        // Skip record size, versions and disk numbers.
        let mut cursor = Cursor::new(&data[24..]);
        let _disk_entries = cursor.read_u64::<LittleEndian>()?;
        Ok(Self {
            total_entries: cursor.read_u64::<LittleEndian>()?,
            cd_size: cursor.read_u64::<LittleEndian>()?,
            cd_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// Central directory file header signature.
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
/// Central directory file header size without variable fields.
pub const CDFH_MIN_SIZE: usize = 46;

/// Local file header signature.
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
/// Local file header size without variable fields.
pub const LFH_SIZE: usize = 30;

/// An entry listed in the central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// Entry name as stored in the archive
    pub name: String,
    /// Compression method
    pub compression_method: CompressionMethod,
    /// Size of the stored data
    pub compressed_size: u64,
    /// Size after decompression
    pub uncompressed_size: u64,
    /// CRC-32 of the uncompressed data
    pub crc32: u32,
    /// Offset of the local file header
    pub lfh_offset: u64,
}

impl ZipEntry {
    /// Whether the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Whether the entry name ends with `.extension`, ignoring ASCII case.
    pub fn has_extension(&self, extension: &str) -> bool {
        let name = self.name.as_bytes();
        let ext = extension.as_bytes();
        name.len() > ext.len() + 1
            && name[name.len() - ext.len() - 1] == b'.'
            && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
    }
}
