//! Report store configuration.
//!
//! Archives live under `<data_dir>/<report_dir>/` and are named
//! `<file_prefix><YYYYMMDD>.<archive_extension>`, each holding one entry with
//! the data extension.

use finstat_format::ReportDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default report subdirectory, relative to the data directory.
pub const DEFAULT_REPORT_DIR: &str = "vipdoc/cw";

/// Default archive file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "gpcw";

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the default data directory.
///
/// Uses the platform data directory:
/// - Linux: `~/.local/share/finstat/`
/// - macOS: `~/Library/Application Support/finstat/`
/// - Windows: `%APPDATA%\finstat\`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finstat")
}

/// Locations and naming of report archives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPaths {
    /// Base data directory
    pub data_dir: PathBuf,
    /// Report subdirectory below the data directory
    pub report_dir: PathBuf,
    /// Archive file name prefix, followed by the date
    pub file_prefix: String,
    /// Archive file extension
    pub archive_extension: String,
    /// Extension of the data entry inside an archive
    pub data_extension: String,
}

impl Default for ReportPaths {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            archive_extension: "zip".to_string(),
            data_extension: "dat".to_string(),
        }
    }
}

impl ReportPaths {
    /// Default naming rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Replace the report subdirectory.
    pub fn with_report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.report_dir = report_dir.into();
        self
    }

    /// Load paths from a JSON file; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Directory holding the archives.
    pub fn report_directory(&self) -> PathBuf {
        self.data_dir.join(&self.report_dir)
    }

    /// File name of the archive for `date`.
    pub fn archive_file_name(&self, date: ReportDate) -> String {
        format!("{}{}.{}", self.file_prefix, date, self.archive_extension)
    }

    /// Full path of the archive for `date`.
    pub fn archive_path(&self, date: ReportDate) -> PathBuf {
        self.report_directory().join(self.archive_file_name(date))
    }

    /// Number of leading file name characters before the date.
    pub fn prefix_len(&self) -> usize {
        self.file_prefix.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_archive_path() {
        let paths = ReportPaths::new("/data/tdx");
        let date = ReportDate::from_u32(20230331).unwrap();

        assert_eq!(paths.report_directory(), PathBuf::from("/data/tdx/vipdoc/cw"));
        assert_eq!(paths.archive_file_name(date), "gpcw20230331.zip");
        assert_eq!(
            paths.archive_path(date),
            PathBuf::from("/data/tdx/vipdoc/cw/gpcw20230331.zip")
        );
        assert_eq!(paths.prefix_len(), 4);
    }

    #[test]
    fn test_custom_report_dir() {
        let paths = ReportPaths::new("/srv").with_report_dir("reports");
        assert_eq!(paths.report_directory(), PathBuf::from("/srv/reports"));
    }

    #[test]
    fn test_default_data_dir_ends_with_name() {
        assert!(default_data_dir().ends_with("finstat"));
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_dir": "/opt/tdx", "file_prefix": "cw"}}"#).unwrap();

        let paths = ReportPaths::from_json_file(file.path()).unwrap();
        assert_eq!(paths.data_dir, PathBuf::from("/opt/tdx"));
        assert_eq!(paths.file_prefix, "cw");
        assert_eq!(paths.report_dir, PathBuf::from(DEFAULT_REPORT_DIR));
        assert_eq!(paths.data_extension, "dat");
    }

    #[test]
    fn test_from_json_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ReportPaths::from_json_file(file.path()),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ReportPaths::from_json_file("/nonexistent/finstat.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
