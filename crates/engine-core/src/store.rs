use crate::{
    error::{QueryError, Result},
    query_id::{is_valid_file_base_name, mapper_file_name},
    settings::EngineSettings,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{debug, info};

/// Registry of mapper files.
///
/// Holds the configured root directory and a cache of raw file contents keyed
/// by file name. An entry is written once, on the first successful load, and
/// never replaced or evicted afterwards.
#[derive(Debug, Default)]
pub struct MapperStore {
    root: RwLock<Option<PathBuf>>,
    cache: RwLock<HashMap<String, Arc<str>>>,
}

impl MapperStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(path: impl Into<PathBuf>) -> Self {
        let store = Self::new();
        store.configure(path);
        store
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        let store = Self::new();
        if let Some(path) = &settings.map_path {
            store.configure(path);
        }
        store
    }

    /// Set the directory mapper files are read from. Later calls replace the
    /// previous value; files already cached are not reloaded.
    pub fn configure(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!(path = %path.display(), "Mapper root configured");
        *write(&self.root) = Some(path);
    }

    pub fn root(&self) -> Option<PathBuf> {
        read(&self.root).clone()
    }

    /// Raw text of `<file_base_name>.xml`, read from disk on first use.
    pub fn load(&self, file_base_name: &str) -> Result<Arc<str>> {
        // Keeps lookups inside the root directory.
        if !is_valid_file_base_name(file_base_name) {
            return Err(QueryError::InvalidFileName(file_base_name.to_string()));
        }
        let file_name = mapper_file_name(file_base_name);

        if let Some(text) = read(&self.cache).get(&file_name) {
            debug!(file = %file_name, "Mapper cache hit");
            return Ok(Arc::clone(text));
        }

        let root = self.root().ok_or(QueryError::ConfigNotSet)?;
        let path = root.join(&file_name);
        if !path.is_file() {
            return Err(QueryError::MapperFileNotFound(path));
        }

        debug!(path = %path.display(), "Reading mapper file");
        let text = fs::read_to_string(&path).map_err(|source| QueryError::Io {
            path: path.clone(),
            source,
        })?;

        // A concurrent loader may have inserted first; its entry wins.
        let mut cache = write(&self.cache);
        let entry = cache
            .entry(file_name)
            .or_insert_with(|| Arc::from(text.as_str()));

        Ok(Arc::clone(entry))
    }

    pub fn is_cached(&self, file_base_name: &str) -> bool {
        read(&self.cache).contains_key(&mapper_file_name(file_base_name))
    }

    /// Names of the cached files, sorted.
    pub fn cached_files(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.cache).keys().cloned().collect();
        names.sort();
        names
    }

    /// Base names of the `*.xml` files present under the root directory,
    /// sorted. Only names usable in a query id are returned.
    pub fn available_files(&self) -> Result<Vec<String>> {
        let root = self.root().ok_or(QueryError::ConfigNotSet)?;
        let io_error = |source| QueryError::Io {
            path: root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&root).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if let Some(base) = mapper_base_name(&path) {
                names.push(base);
            }
        }

        names.sort();
        Ok(names)
    }
}

fn mapper_base_name(path: &Path) -> Option<String> {
    if !path.is_file() || path.extension()? != "xml" {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    is_valid_file_base_name(stem).then(|| stem.to_string())
}

// Cached values are immutable once inserted, so a poisoned lock still holds
// consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
