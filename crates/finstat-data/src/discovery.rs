//! Reporting date discovery.
//!
//! Dates are read off archive file names: the stem before the first `.`,
//! without the archive prefix. `gpcw20230331.zip` yields `20230331`.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// A directory entry as seen by date discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// File name without the directory part
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl ListedEntry {
    /// A plain file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// A directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Hidden entries start with a dot.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Source of directory listings.
pub trait DirectoryListing {
    /// List the entries of `dir` in enumeration order.
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;
}

/// Listing backed by the local filesystem, sorted by file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectory;

impl DirectoryListing for LocalDirectory {
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            entries.push(ListedEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Date text carried by an archive file name, if any.
///
/// `prefix_len` counts characters. Stems no longer than the prefix carry no
/// date.
pub fn date_from_file_name(name: &str, prefix_len: usize) -> Option<String> {
    let stem = name.split('.').next().unwrap_or_default();
    let date: String = stem.chars().skip(prefix_len).collect();
    (!date.is_empty()).then_some(date)
}

/// Candidate date texts for the entries of a listing, in listing order.
///
/// Hidden entries and directories are ignored. Each date appears once, at the
/// position of the first entry that names it; `gpcw20230331.zip` and
/// `gpcw20230331.zip.part` yield a single `20230331`. The texts are not
/// validated.
pub fn discover_dates(entries: &[ListedEntry], prefix_len: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| !entry.is_dir && !entry.is_hidden())
        .filter_map(|entry| date_from_file_name(&entry.name, prefix_len))
        .filter(|date| seen.insert(date.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("gpcw20230331.zip", Some("20230331"))]
    #[case("gpcw20230331.dat.bak", Some("20230331"))]
    #[case("gpcw20230331", Some("20230331"))]
    #[case("gpcwabc.zip", Some("abc"))]
    #[case("gpcw.zip", None)]
    #[case("gp.zip", None)]
    #[case("", None)]
    fn test_date_from_file_name(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(date_from_file_name(name, 4).as_deref(), expected);
    }

    #[test]
    fn test_discover_skips_hidden_and_directories() {
        let entries = vec![
            ListedEntry::file(".gpcw20221231.zip"),
            ListedEntry::dir("gpcw20220930"),
            ListedEntry::file("gpcw20230331.zip"),
            ListedEntry::file("gpcw.zip"),
            ListedEntry::file("gpcw20230630.zip"),
        ];

        assert_eq!(discover_dates(&entries, 4), vec!["20230331", "20230630"]);
    }

    #[test]
    fn test_discover_keeps_first_of_repeated_dates() {
        let entries = vec![
            ListedEntry::file("gpcw20230630.zip"),
            ListedEntry::file("gpcw20230331.zip"),
            ListedEntry::file("gpcw20230331.zip.part"),
            ListedEntry::file("gpcw20230630.dat"),
        ];

        assert_eq!(discover_dates(&entries, 4), vec!["20230630", "20230331"]);
    }

    #[test]
    fn test_local_directory_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gpcw20230630.zip"), b"").unwrap();
        std::fs::write(dir.path().join("gpcw20230331.zip"), b"").unwrap();
        std::fs::create_dir(dir.path().join("backup")).unwrap();

        let entries = LocalDirectory.list(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                ListedEntry::dir("backup"),
                ListedEntry::file("gpcw20230331.zip"),
                ListedEntry::file("gpcw20230630.zip"),
            ]
        );
    }

    #[test]
    fn test_local_directory_missing() {
        let dir = TempDir::new().unwrap();
        assert!(LocalDirectory.list(&dir.path().join("absent")).is_err());
    }
}
