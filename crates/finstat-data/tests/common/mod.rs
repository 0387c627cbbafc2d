//! Shared helpers for report store tests.

#![allow(dead_code)]

use finstat_data::ReportPaths;
use finstat_data::fixtures::zip_with_entry;
use finstat_format::ReportLayout;
use finstat_format::fixtures::ReportBufferBuilder;
use std::path::Path;
use tempfile::TempDir;

/// A temporary report store with the default naming.
pub struct TestStore {
    pub dir: TempDir,
    pub paths: ReportPaths,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let paths = ReportPaths::new(dir.path());
        std::fs::create_dir_all(paths.report_directory()).unwrap();
        Self { dir, paths }
    }

    pub fn report_dir(&self) -> std::path::PathBuf {
        self.paths.report_directory()
    }

    /// Write `gpcw<date>.zip` holding a deflated `gpcw<date>.dat` entry.
    pub fn add_report(&self, date: &str, buffer: &[u8]) {
        let zip = zip_with_entry(&format!("gpcw{date}.dat"), buffer);
        self.add_file(&format!("gpcw{date}.zip"), &zip);
    }

    pub fn add_file(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.report_dir().join(name), bytes).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Standard-layout buffer with one record per `(identifier, first metrics)`.
pub fn report_buffer(records: &[(&str, Vec<f64>)]) -> Vec<u8> {
    records
        .iter()
        .fold(ReportBufferBuilder::new(ReportLayout::STANDARD), |builder, (id, metrics)| {
            builder.record(id, metrics)
        })
        .build()
}
