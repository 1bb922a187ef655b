//! Path-keyed cache of loaded and reshaped tables.
//!
//! A table is read at most once per path and read settings (format and delimiter) per process.
//! The entry is replaced only when the file's modification time changes; a failed load leaves
//! every existing entry untouched.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::SystemTime;

use crate::error::ExplorerResult;
use crate::processing::{CleaningPolicy, melt};
use crate::types::{RawTable, TidyTable};

use super::unified::{LoadOptions, TableFormat, load_from_path};

/// The same file read with a different format or delimiter is a different table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    format: TableFormat,
    delimiter: u8,
}

impl CacheKey {
    fn new(path: &Path, options: &LoadOptions) -> Self {
        let format = options.format_for(path);
        let delimiter = match format {
            TableFormat::Csv => options.delimiter_for(path),
            TableFormat::Json => 0,
        };
        Self {
            path: path.to_path_buf(),
            format,
            delimiter,
        }
    }
}

struct CacheEntry {
    modified: Option<SystemTime>,
    raw: Arc<RawTable>,
    tidy: HashMap<CleaningPolicy, Arc<TidyTable>>,
}

/// Cache of [`RawTable`]s (and their tidy forms) keyed by input path and read settings.
///
/// [`TableCache::global`] is the process-wide instance behind [`super::load`]; separate
/// instances can be created where isolation is needed.
#[derive(Default)]
pub struct TableCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lazily initialised process-wide cache.
    pub fn global() -> &'static TableCache {
        static GLOBAL: OnceLock<TableCache> = OnceLock::new();
        GLOBAL.get_or_init(TableCache::new)
    }

    /// Load `path`, returning the cached table when the file is unchanged and was read with the
    /// same format and delimiter as `options` resolve to.
    pub fn load(&self, path: impl AsRef<Path>, options: &LoadOptions) -> ExplorerResult<Arc<RawTable>> {
        let path = path.as_ref();
        let key = CacheKey::new(path, options);
        // `None` when the file cannot be stat'ed; the read below reports why.
        let stamp = fs::metadata(path).ok().map(|m| m.modified().ok());

        if let Some(modified) = stamp {
            if let Some(entry) = self.lock().get(&key) {
                if entry.modified == modified {
                    if let Some(obs) = options.observer.as_ref() {
                        obs.on_cache_hit(&options.context(path));
                    }
                    log::debug!("cache hit for {}", path.display());
                    return Ok(Arc::clone(&entry.raw));
                }
                log::info!("{} changed on disk, reloading", path.display());
            }
        }

        let raw = Arc::new(load_from_path(path, options)?);
        self.lock().insert(
            key,
            CacheEntry {
                modified: stamp.flatten(),
                raw: Arc::clone(&raw),
                tidy: HashMap::new(),
            },
        );
        Ok(raw)
    }

    /// Load `path` and reshape it with `policy`, caching the tidy table alongside the raw one.
    pub fn load_tidy(
        &self,
        path: impl AsRef<Path>,
        policy: CleaningPolicy,
        options: &LoadOptions,
    ) -> ExplorerResult<Arc<TidyTable>> {
        let path = path.as_ref();
        let raw = self.load(path, options)?;

        let mut entries = self.lock();
        match entries.get_mut(&CacheKey::new(path, options)) {
            Some(entry) if Arc::ptr_eq(&entry.raw, &raw) => {
                let tidy = entry
                    .tidy
                    .entry(policy)
                    .or_insert_with(|| Arc::new(melt(&raw, policy)));
                Ok(Arc::clone(tidy))
            }
            // The entry was replaced concurrently; hand back an uncached reshape.
            _ => Ok(Arc::new(melt(&raw, policy))),
        }
    }

    /// Returns `true` if `path` has a cached table under any read settings.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.lock().keys().any(|k| k.path.as_path() == path)
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
