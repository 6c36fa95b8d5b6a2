// Response store backing the revalidation window.
// Keeps the last good body per URL on disk together with its fetch time.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::error::Result;

use super::paths;

/// Default revalidation window: one hour.
pub const REVALIDATE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Wrapper for stored data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The stored data.
    pub data: T,
    /// When the data was fetched.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is older than the revalidation window.
    pub fn is_stale(&self, window: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= window
    }

    /// Check if this entry can be served without a network fetch.
    pub fn is_fresh(&self, window: Duration) -> bool {
        !self.is_stale(window)
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let cached: CachedData<T> = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Write data to cache as JSON.
pub fn write_cached<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let cached = CachedData::new(data);
    let json = serde_json::to_string_pretty(&cached)?;
    write_atomic(path, json.as_bytes())
}

/// Write bytes via a temp file and rename, creating parent directories.
///
/// Each call writes its own uniquely named temp file in the target directory,
/// so concurrent writers to the same path never share one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// On-disk store of remote responses keyed by URL.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    root: PathBuf,
    window: Duration,
}

impl ResponseStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>, window: Duration) -> Self {
        Self {
            root: root.into(),
            window,
        }
    }

    /// Store under the platform cache directory, if one can be determined.
    pub fn in_cache_dir(window: Duration) -> Option<Self> {
        paths::responses_dir().map(|root| Self::new(root, window))
    }

    /// Load the stored entry for a URL regardless of age.
    pub fn load<T: DeserializeOwned>(&self, url: &str) -> Result<Option<CachedData<T>>> {
        read_cached(&paths::response_path(&self.root, url))
    }

    /// Load the stored entry for a URL only if it is inside the window.
    pub fn load_fresh<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        match self.load::<T>(url)? {
            Some(cached) if cached.is_fresh(self.window) => Ok(Some(cached.data)),
            _ => Ok(None),
        }
    }

    /// Record a freshly fetched body for a URL.
    pub fn save<T: Serialize>(&self, url: &str, data: &T) -> Result<()> {
        write_cached(&paths::response_path(&self.root, url), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResponseStore::new(temp_dir.path(), REVALIDATE_AFTER);
        let url = "https://example.com/data/categories.json";

        store.save(url, &json!([{"id": "design-tools"}])).unwrap();

        let loaded: Option<Value> = store.load_fresh(url).unwrap();
        assert_eq!(loaded, Some(json!([{"id": "design-tools"}])));
    }

    #[test]
    fn test_stale_entry_is_not_fresh() {
        let mut data = CachedData::new("body");
        data.cached_at = Utc::now() - chrono::Duration::seconds(7200);

        assert!(data.is_stale(REVALIDATE_AFTER));
        assert!(!data.is_fresh(REVALIDATE_AFTER));
    }

    #[test]
    fn test_load_fresh_skips_stale_but_load_keeps_it() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResponseStore::new(temp_dir.path(), REVALIDATE_AFTER);
        let url = "https://example.com/data/ai-tools.json";

        let mut stale = CachedData::new(json!([]));
        stale.cached_at = Utc::now() - chrono::Duration::seconds(3 * 3600);
        let path = paths::response_path(temp_dir.path(), url);
        write_atomic(&path, serde_json::to_string(&stale).unwrap().as_bytes()).unwrap();

        let fresh: Option<Value> = store.load_fresh(url).unwrap();
        assert!(fresh.is_none());

        let any: Option<CachedData<Value>> = store.load(url).unwrap();
        assert!(any.is_some());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let cached: Option<CachedData<Value>> = read_cached(&path).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.json");

        write_atomic(&path, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_saves_leave_readable_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResponseStore::new(temp_dir.path(), REVALIDATE_AFTER);
        let url = "https://example.com/data/categories.json";

        for round in 0..50 {
            std::thread::scope(|scope| {
                for writer in 0..4usize {
                    let store = &store;
                    scope.spawn(move || {
                        let body = json!(vec!["x"; 1 + writer * 40 + round]);
                        store.save(url, &body).unwrap();
                    });
                }
            });

            let loaded: Option<CachedData<Value>> = store.load(url).unwrap();
            let len = loaded.unwrap().data.as_array().unwrap().len();
            assert!((0..4).any(|writer| len == 1 + writer * 40 + round));
        }

        // Only the entry itself remains; no temp files are left behind.
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
