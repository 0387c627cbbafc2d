//! Zip reader over any seekable source.
//!
//! Archives are read from the end: the end of central directory record
//! (possibly preceded by a comment) gives the central directory location,
//! which lists every entry. Entry data is only touched on demand.

use super::ZipError;
use super::structures::*;
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Maximum archive comment size allowed by the format.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Upper bound on the capacity reserved up front for one entry.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Reader for a single zip archive.
#[derive(Debug)]
pub struct ZipReader<R> {
    reader: R,
    size: u64,
    entries: Vec<ZipEntry>,
}

impl<R: Read + Seek> ZipReader<R> {
    /// Open an archive and read its central directory.
    pub fn new(mut reader: R) -> Result<Self, ZipError> {
        let size = reader.seek(SeekFrom::End(0))?;
        let mut zip = Self {
            reader,
            size,
            entries: Vec::new(),
        };
        zip.entries = zip.read_central_directory()?;
        Ok(zip)
    }

    /// Entries in central directory order.
    pub fn entries(&self) -> &[ZipEntry] {
        &self.entries
    }

    /// First non-directory entry whose name ends with `.extension`.
    pub fn find_by_extension(&self, extension: &str) -> Option<&ZipEntry> {
        self.entries
            .iter()
            .find(|e| !e.is_directory() && e.has_extension(extension))
    }

    /// Decompress one entry fully into memory.
    ///
    /// The result is checked against the size and CRC-32 recorded in the
    /// central directory.
    pub fn read_entry(&mut self, entry: &ZipEntry) -> Result<Vec<u8>, ZipError> {
        let data_offset = self.data_offset(entry)?;
        let data_end = data_offset.checked_add(entry.compressed_size);
        if data_end.is_none_or(|end| end > self.size) {
            return Err(ZipError::Corrupt(format!(
                "data of {} extends past the end of the archive",
                entry.name
            )));
        }

        self.reader.seek(SeekFrom::Start(data_offset))?;
        let stored = (&mut self.reader).take(entry.compressed_size);
        // One byte over the recorded size is enough to detect a mismatch.
        let limit = entry.uncompressed_size.saturating_add(1);
        let mut data = Vec::with_capacity(entry.uncompressed_size.min(MAX_PREALLOCATION) as usize);

        match entry.compression_method {
            CompressionMethod::Stored => {
                stored.take(limit).read_to_end(&mut data)?;
            }
            CompressionMethod::Deflate => {
                DeflateDecoder::new(stored).take(limit).read_to_end(&mut data)?;
            }
            CompressionMethod::Unknown(method) => return Err(ZipError::UnsupportedMethod(method)),
        }

        if data.len() as u64 != entry.uncompressed_size {
            return Err(ZipError::SizeMismatch {
                name: entry.name.clone(),
                expected: entry.uncompressed_size,
                actual: data.len() as u64,
            });
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(ZipError::ChecksumMismatch {
                name: entry.name.clone(),
                expected: entry.crc32,
                actual: crc.sum(),
            });
        }

        Ok(data)
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, ZipError> {
        let end = offset.checked_add(len as u64);
        if end.is_none_or(|end| end > self.size) {
            return Err(ZipError::Corrupt(format!(
                "record at {offset} of {len} bytes extends past the end of the archive"
            )));
        }
        let mut buf = vec![0u8; len];
        self.reader.seek(SeekFrom::Start(offset))?;
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Locate the end of central directory record.
    fn find_eocd(&mut self) -> Result<(EndOfCentralDirectory, u64), ZipError> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            return Err(ZipError::Corrupt("file too small for a zip archive".to_string()));
        }

        // Common case: no archive comment.
        let offset = self.size - eocd_size;
        let buf = self.read_at(offset, EndOfCentralDirectory::SIZE)?;
        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && buf[20..22] == [0, 0] {
            return Ok((EndOfCentralDirectory::from_bytes(&buf)?, offset));
        }

        let search_size = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let search_start = self.size - search_size;
        let buf = self.read_at(search_start, search_size as usize)?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;
            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd =
                    EndOfCentralDirectory::from_bytes(&buf[i..i + EndOfCentralDirectory::SIZE])?;
                return Ok((eocd, search_start + i as u64));
            }
        }

        Err(ZipError::Corrupt(
            "end of central directory not found".to_string(),
        ))
    }

    fn read_zip64_eocd(&mut self, eocd_offset: u64) -> Result<Zip64EndOfCentralDirectory, ZipError> {
        let locator_offset = eocd_offset
            .checked_sub(Zip64Locator::SIZE as u64)
            .ok_or_else(|| ZipError::Corrupt("missing ZIP64 locator".to_string()))?;
        let locator = Zip64Locator::from_bytes(&self.read_at(locator_offset, Zip64Locator::SIZE)?)?;
        let record = self.read_at(
            locator.eocd64_offset,
            Zip64EndOfCentralDirectory::MIN_SIZE,
        )?;
        Zip64EndOfCentralDirectory::from_bytes(&record)
    }

    fn read_central_directory(&mut self) -> Result<Vec<ZipEntry>, ZipError> {
        let (eocd, eocd_offset) = self.find_eocd()?;

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset)?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                u64::from(eocd.cd_offset),
                u64::from(eocd.cd_size),
                u64::from(eocd.total_entries),
            )
        };

        if cd_offset.checked_add(cd_size).is_none_or(|end| end > eocd_offset) {
            return Err(ZipError::Corrupt(
                "central directory overlaps its end record".to_string(),
            ));
        }
        if total_entries.saturating_mul(CDFH_MIN_SIZE as u64) > cd_size {
            return Err(ZipError::Corrupt(format!(
                "{total_entries} entries cannot fit in a central directory of {cd_size} bytes"
            )));
        }

        let cd_data = self.read_at(cd_offset, cd_size as usize)?;
        let mut cursor = Cursor::new(cd_data.as_slice());
        (0..total_entries)
            .map(|_| parse_cdfh(&mut cursor))
            .collect()
    }

    /// Offset of an entry's data, past its local header.
    fn data_offset(&mut self, entry: &ZipEntry) -> Result<u64, ZipError> {
        let lfh = self.read_at(entry.lfh_offset, LFH_SIZE)?;
        if &lfh[0..4] != LFH_SIGNATURE {
            return Err(ZipError::Corrupt(format!(
                "invalid local file header for {}",
                entry.name
            )));
        }

        let mut cursor = Cursor::new(&lfh[26..]);
        let file_name_length = u64::from(cursor.read_u16::<LittleEndian>()?);
        let extra_field_length = u64::from(cursor.read_u16::<LittleEndian>()?);

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }
}

fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ZipEntry, ZipError> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        return Err(ZipError::Corrupt(
            "invalid central directory file header".to_string(),
        ));
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = u64::from(cursor.read_u32::<LittleEndian>()?);
    let mut uncompressed_size = u64::from(cursor.read_u32::<LittleEndian>()?);
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let mut lfh_offset = u64::from(cursor.read_u32::<LittleEndian>()?);

    let mut name = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut name)?;
    let name = String::from_utf8_lossy(&name).into_owned();

    let extra_end = cursor.position() + u64::from(extra_field_length);
    while cursor.position() + 4 <= extra_end {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = u64::from(cursor.read_u16::<LittleEndian>()?);
        let field_end = cursor.position() + field_size;

        if header_id == 0x0001 {
            // ZIP64 values appear only for saturated header fields, in this order.
            if uncompressed_size == 0xFFFF_FFFF && cursor.position() + 8 <= field_end {
                uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed_size == 0xFFFF_FFFF && cursor.position() + 8 <= field_end {
                compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if lfh_offset == 0xFFFF_FFFF && cursor.position() + 8 <= field_end {
                lfh_offset = cursor.read_u64::<LittleEndian>()?;
            }
        }
        cursor.set_position(field_end);
    }
    cursor.set_position(extra_end + u64::from(file_comment_length));

    Ok(ZipEntry {
        name,
        compression_method: CompressionMethod::from_u16(compression_method),
        compressed_size,
        uncompressed_size,
        crc32,
        lfh_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixtureEntry, build_zip};

    fn open(bytes: Vec<u8>) -> Result<ZipReader<Cursor<Vec<u8>>>, ZipError> {
        ZipReader::new(Cursor::new(bytes))
    }

    #[test]
    fn test_list_and_read_stored() {
        let bytes = build_zip(&[FixtureEntry::stored("gpcw20230331.dat", b"hello report")], None);
        let mut zip = open(bytes).unwrap();

        assert_eq!(zip.entries().len(), 1);
        let entry = zip.entries()[0].clone();
        assert_eq!(entry.name, "gpcw20230331.dat");
        assert_eq!(entry.compression_method, CompressionMethod::Stored);
        assert_eq!(zip.read_entry(&entry).unwrap(), b"hello report");
    }

    #[test]
    fn test_read_deflated() {
        let payload: Vec<u8> = (0..10_000u32).flat_map(|i| (i % 97).to_le_bytes()).collect();
        let bytes = build_zip(&[FixtureEntry::deflated("gpcw.dat", &payload)], None);
        let mut zip = open(bytes).unwrap();

        let entry = zip.entries()[0].clone();
        assert_eq!(entry.compression_method, CompressionMethod::Deflate);
        assert!(entry.compressed_size < entry.uncompressed_size);
        assert_eq!(zip.read_entry(&entry).unwrap(), payload);
    }

    #[test]
    fn test_archive_with_comment() {
        let bytes = build_zip(
            &[FixtureEntry::stored("a.dat", b"x")],
            Some(b"published quarterly".as_slice()),
        );
        let zip = open(bytes).unwrap();
        assert_eq!(zip.entries()[0].name, "a.dat");
    }

    #[test]
    fn test_find_by_extension_takes_first_match() {
        let bytes = build_zip(
            &[
                FixtureEntry::stored("readme.txt", b"notes"),
                FixtureEntry::stored("dir.dat/", b""),
                FixtureEntry::stored("first.DAT", b"1"),
                FixtureEntry::stored("second.dat", b"2"),
            ],
            None,
        );
        let zip = open(bytes).unwrap();
        assert_eq!(zip.find_by_extension("dat").unwrap().name, "first.DAT");
        assert!(zip.find_by_extension("csv").is_none());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            open(b"definitely not a zip archive at all".to_vec()),
            Err(ZipError::Corrupt(_))
        ));
        assert!(matches!(open(Vec::new()), Err(ZipError::Corrupt(_))));
    }

    #[test]
    fn test_truncated_central_directory() {
        let mut bytes = build_zip(&[FixtureEntry::stored("a.dat", b"abc")], None);
        // Claim a central directory larger than the archive.
        let len = bytes.len();
        bytes[len - 10..len - 6].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(open(bytes), Err(ZipError::Corrupt(_))));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = build_zip(&[FixtureEntry::stored("a.dat", b"abcdef")], None);
        // Data follows the 30-byte local header and the 5-byte name.
        bytes[35] ^= 0xFF;
        let mut zip = open(bytes).unwrap();
        let entry = zip.entries()[0].clone();
        assert!(matches!(
            zip.read_entry(&entry),
            Err(ZipError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_corrupt_deflate_stream() {
        // Poorly compressible so the damaged bytes stay inside the stream.
        let payload: Vec<u8> = (0..4096u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();
        let mut bytes = build_zip(&[FixtureEntry::deflated("a.dat", &payload)], None);
        for b in &mut bytes[35..45] {
            *b = 0xFF;
        }
        let mut zip = open(bytes).unwrap();
        let entry = zip.entries()[0].clone();
        assert!(zip.read_entry(&entry).is_err());
    }

    #[test]
    fn test_unsupported_method() {
        let entry = FixtureEntry::stored("a.dat", b"abc").with_method(12);
        let bytes = build_zip(&[entry], None);
        let mut zip = open(bytes).unwrap();
        let entry = zip.entries()[0].clone();
        assert!(matches!(
            zip.read_entry(&entry),
            Err(ZipError::UnsupportedMethod(12))
        ));
    }
}
