//! On-disk page cache.
//!
//! Each page is stored as pretty-printed JSON under `{dir}/{sanitized title}.json`.
//! A present file is trusted as-is: there is no staleness or schema check.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::PageRecord;

/// Make a page title safe to use as a file name.
///
/// Spaces and both kinds of path separator become underscores.
///
/// # Examples
///
/// ```
/// use notion_scribe::cache::sanitize_title;
///
/// assert_eq!(sanitize_title("Even Pairs"), "Even_Pairs");
/// assert_eq!(sanitize_title("Attack/Defense\\2"), "Attack_Defense_2");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title.replace([' ', '/', '\\'], "_")
}

/// Directory of cached page records.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for a page title.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_title(title)))
    }

    /// Load the cached record for `title`, if present.
    pub fn load(&self, title: &str) -> Result<Option<PageRecord>> {
        let path = self.path_for(title);
        match fs::read_to_string(&path) {
            Ok(json) => parse_record(&path, &json).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `record` to the cache, creating the directory if needed.
    pub fn store(&self, record: &PageRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&record.title);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "cached page");
        Ok(path)
    }
}

/// Read a cached record from an explicit file path.
pub fn load_record(path: &Path) -> Result<PageRecord> {
    let json = fs::read_to_string(path)?;
    parse_record(path, &json)
}

fn parse_record(path: &Path, json: &str) -> Result<PageRecord> {
    serde_json::from_str(json).map_err(|source| Error::CacheCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(title: &str) -> PageRecord {
        PageRecord {
            title: title.to_string(),
            week: 3,
            difficulty: Some("Medium".to_string()),
            problem_type: "Problem".to_string(),
            tags: vec!["greedy".to_string()],
            pdf_url: Some("https://files.example/p.pdf".to_string()),
            pdf: Some("statement".to_string()),
            content: "## Solutions\n".to_string(),
        }
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Even Matrices"), "Even_Matrices");
        assert_eq!(sanitize_title("a/b\\c d"), "a_b_c_d");
        assert_eq!(sanitize_title("Dominoes"), "Dominoes");
    }

    #[test]
    fn test_missing_entry_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = PageCache::new(dir.path());
        assert!(cache.load("Nothing Here").unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = PageCache::new(dir.path().join("cache"));

        let path = cache.store(&record("Light at the Museum")).unwrap();
        assert_eq!(path, dir.path().join("cache/Light_at_the_Museum.json"));

        let loaded = cache.load("Light at the Museum").unwrap();
        assert_eq!(loaded, Some(record("Light at the Museum")));
    }

    #[test]
    fn test_stored_json_is_indented() {
        let dir = TempDir::new().unwrap();
        let cache = PageCache::new(dir.path());
        let path = cache.store(&record("Motorcycles")).unwrap();
        let json = std::fs::read_to_string(path).unwrap();
        assert!(json.starts_with("{\n  \"title\": \"Motorcycles\""));
    }

    #[test]
    fn test_corrupt_entry_is_reported() {
        let dir = TempDir::new().unwrap();
        let cache = PageCache::new(dir.path());
        std::fs::write(cache.path_for("Broken"), "{ not json").unwrap();

        let err = cache.load("Broken").unwrap_err();
        assert!(matches!(err, Error::CacheCorrupt { .. }));
    }

    #[test]
    fn test_load_record_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_record(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
