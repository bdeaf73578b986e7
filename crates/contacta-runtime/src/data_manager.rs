//! Signature-validated table cache.
//!
//! A [`TableCache`] remembers the last table loaded for each
//! `(path, delimiter)` pair together with the file's modification time and
//! byte length. While those are unchanged the cached table is handed back
//! without touching the file contents; any change reloads it. The cache is
//! owned by its caller, so two sessions never share entries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use contacta_core::error::{DashboardError, Result};
use contacta_core::models::Loaded;

// ── FileSignature ─────────────────────────────────────────────────────────────

/// What a cached table is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileSignature {
    /// Stat `path`. Fails with [`DashboardError::FileRead`] when the file is
    /// missing or unreadable.
    pub fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

// ── TableCache ────────────────────────────────────────────────────────────────

struct CacheEntry<T> {
    signature: FileSignature,
    loaded: Arc<Loaded<T>>,
}

/// Per-file memo of loaded tables.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use contacta_runtime::data_manager::TableCache;
/// use contacta_data::interviews::load_interviews;
///
/// let mut cache = TableCache::new();
/// let loaded = cache
///     .get_or_load(Path::new("entrevistas_total.csv"), b';', load_interviews)
///     .unwrap();
/// println!("{} rows", loaded.table.len());
/// ```
pub struct TableCache<T> {
    entries: HashMap<(PathBuf, u8), CacheEntry<T>>,
    /// Number of times a loader actually ran.
    disk_reads: usize,
}

impl<T> Default for TableCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TableCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            disk_reads: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the table for `path`, loading it with `load` on a miss.
    ///
    /// A failed load drops any previous entry for the same key, so a broken
    /// file is never masked by stale data.
    pub fn get_or_load<F>(&mut self, path: &Path, delimiter: u8, load: F) -> Result<Arc<Loaded<T>>>
    where
        F: FnOnce(&Path, u8) -> Result<Loaded<T>>,
    {
        let key = (path.to_path_buf(), delimiter);
        let signature = match FileSignature::of(path) {
            Ok(sig) => sig,
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        if let Some(entry) = self.entries.get(&key) {
            if entry.signature == signature {
                tracing::debug!(path = %path.display(), "table cache hit");
                return Ok(Arc::clone(&entry.loaded));
            }
            tracing::debug!(path = %path.display(), "file changed; reloading");
        }

        self.disk_reads += 1;
        match load(path, delimiter) {
            Ok(loaded) => {
                let loaded = Arc::new(loaded);
                tracing::debug!(
                    path = %path.display(),
                    warnings = loaded.warnings.len(),
                    "table cache updated"
                );
                self.entries.insert(
                    key,
                    CacheEntry {
                        signature,
                        loaded: Arc::clone(&loaded),
                    },
                );
                Ok(loaded)
            }
            Err(e) => {
                self.entries.remove(&key);
                Err(e)
            }
        }
    }

    /// Forget every cached table.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        tracing::debug!("table cache invalidated");
    }

    /// How many times a loader has run since construction.
    pub fn disk_reads(&self) -> usize {
        self.disk_reads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use contacta_core::area_labels::AreaLabels;
    use contacta_core::models::ContractTable;
    use contacta_data::loader::load_contracts;
    use tempfile::TempDir;

    const CONTRACTS: &str = "Area;Data_Fim;Turno;Regularizado\n\
                             AC;05/12/2025;Manhã;NÃO\n\
                             LG;01/11/2025;Tarde;SIM\n";

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("dadoslimpos.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn load(path: &Path, delimiter: u8) -> Result<Loaded<ContractTable>> {
        load_contracts(path, delimiter, &AreaLabels::default())
    }

    #[test]
    fn test_second_load_is_cached() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path, b';', load).unwrap();
        let second = cache.get_or_load(&path, b';', load).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.table, second.table);
        assert_eq!(cache.disk_reads(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_modified_file_reloads() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path, b';', load).unwrap();
        assert_eq!(first.table.len(), 2);

        write(dir.path(), &format!("{CONTRACTS}RS;10/12/2025;Integral;SIM\n"));
        let second = cache.get_or_load(&path, b';', load).unwrap();

        assert_eq!(second.table.len(), 3);
        assert_eq!(cache.disk_reads(), 2);
    }

    #[test]
    fn test_delimiter_is_part_of_key() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        cache.get_or_load(&path, b';', load).unwrap();
        // Comma-split sees a single "Area;Data_Fim;..." column and fails.
        assert!(cache.get_or_load(&path, b',', load).is_err());
        assert_eq!(cache.disk_reads(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_file_errors_and_drops_entry() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        cache.get_or_load(&path, b';', load).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = cache.get_or_load(&path, b';', load).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_reload_drops_stale_entry() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        cache.get_or_load(&path, b';', load).unwrap();
        write(dir.path(), "Nome;Turno\nAna;Manhã\nBruno;Tarde\nCarla;Integral\n");

        let err = cache.get_or_load(&path, b';', load).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), CONTRACTS);
        let mut cache = TableCache::new();

        cache.get_or_load(&path, b';', load).unwrap();
        cache.invalidate();
        assert!(cache.is_empty());

        cache.get_or_load(&path, b';', load).unwrap();
        assert_eq!(cache.disk_reads(), 2);
    }
}
