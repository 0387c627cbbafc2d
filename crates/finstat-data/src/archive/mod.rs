//! Report archive extraction.

pub mod zip;

use crate::config::ReportPaths;
use crate::error::ExtractError;
use finstat_format::ReportDate;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use tracing::debug;
use zip::ZipReader;

/// Opens the archive of a reporting date and returns its data entry.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    paths: ReportPaths,
}

impl ArchiveExtractor {
    /// Create an extractor for the archives described by `paths`.
    pub const fn new(paths: ReportPaths) -> Self {
        Self { paths }
    }

    /// The configured paths.
    pub const fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    /// Read the uncompressed bytes of the data entry for `date`.
    ///
    /// Only the first entry with the data extension is decompressed; any
    /// further entries are ignored.
    pub fn open(&self, date: ReportDate) -> Result<Vec<u8>, ExtractError> {
        let path = self.paths.archive_path(date);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ExtractError::NotFound { path });
            }
            Err(e) => {
                return Err(ExtractError::CorruptArchive {
                    path,
                    source: e.into(),
                });
            }
        };

        let mut archive = match ZipReader::new(BufReader::new(file)) {
            Ok(archive) => archive,
            Err(source) => return Err(ExtractError::CorruptArchive { path, source }),
        };

        let extension = &self.paths.data_extension;
        let Some(entry) = archive.find_by_extension(extension).cloned() else {
            return Err(ExtractError::NoMatchingEntry {
                path,
                extension: extension.clone(),
            });
        };

        debug!(
            archive = %path.display(),
            entry = %entry.name,
            size = entry.uncompressed_size,
            "Reading report entry"
        );

        archive
            .read_entry(&entry)
            .map_err(|source| ExtractError::EntryReadFailure {
                path,
                entry: entry.name,
                source,
            })
    }
}
