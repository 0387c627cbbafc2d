//! In-memory zip archives for tests.
//!
//! Enabled with the `fixtures` feature. Archives are written in the classic
//! (non-ZIP64) format with a single central directory and an optional
//! archive comment.

use flate2::Compression;
use flate2::Crc;
use flate2::write::DeflateEncoder;
use std::io::Write;

const STORED: u16 = 0;
const DEFLATE: u16 = 8;

/// One entry of a fixture archive.
#[derive(Debug, Clone)]
pub struct FixtureEntry {
    name: String,
    method: u16,
    data: Vec<u8>,
    stored: Vec<u8>,
}

impl FixtureEntry {
    /// An entry stored without compression.
    pub fn stored(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            method: STORED,
            data: data.to_vec(),
            stored: data.to_vec(),
        }
    }

    /// An entry compressed with raw DEFLATE.
    pub fn deflated(name: &str, data: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        // Writing into a Vec does not fail.
        let stored = encoder
            .write_all(data)
            .and_then(|()| encoder.finish())
            .unwrap_or_default();
        Self {
            name: name.to_string(),
            method: DEFLATE,
            data: data.to_vec(),
            stored,
        }
    }

    /// Record `method` in the headers without changing the stored bytes.
    pub const fn with_method(mut self, method: u16) -> Self {
        self.method = method;
        self
    }
}

/// Serialize `entries` into a zip archive.
pub fn build_zip(entries: &[FixtureEntry], comment: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let mut crc = Crc::new();
        crc.update(&entry.data);
        let offset = out.len() as u32;

        // Fields shared by the local and central headers, from "version
        // needed" through "extra field length".
        let mut common = Vec::with_capacity(26);
        common.extend_from_slice(&20u16.to_le_bytes());
        common.extend_from_slice(&0u16.to_le_bytes());
        common.extend_from_slice(&entry.method.to_le_bytes());
        common.extend_from_slice(&[0u8; 4]);
        common.extend_from_slice(&crc.sum().to_le_bytes());
        common.extend_from_slice(&(entry.stored.len() as u32).to_le_bytes());
        common.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        common.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        common.extend_from_slice(&0u16.to_le_bytes());

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&common);
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(&entry.stored);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&common);
        central.extend_from_slice(&[0u8; 10]);
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(entry.name.as_bytes());
    }

    let cd_offset = out.len() as u32;
    let comment = comment.unwrap_or_default();
    out.extend_from_slice(&central);
    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&cd_offset.to_le_bytes());
    out.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    out.extend_from_slice(comment);
    out
}

/// A single-entry archive holding `data` deflated under `name`.
pub fn zip_with_entry(name: &str, data: &[u8]) -> Vec<u8> {
    build_zip(&[FixtureEntry::deflated(name, data)], None)
}
