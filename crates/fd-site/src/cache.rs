//! In-memory cache of compiled pages.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use fd_renderer::CompiledContent;

/// A compiled page together with its front matter overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPage {
    /// Title from front matter, if set.
    pub title: Option<String>,
    /// Description from front matter, if set.
    pub description: Option<String>,
    /// Compiler output.
    pub content: CompiledContent,
}

struct CacheEntry {
    source_mtime: f64,
    page: Arc<CompiledPage>,
}

/// Compiled pages keyed by docs-relative path.
///
/// An entry is valid only while the source mtime it was compiled from
/// matches the current one, so an edited source is recompiled on the next
/// request.
#[derive(Default)]
pub struct CompileCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CompileCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached page for `path` if it was compiled from `source_mtime`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn get(&self, path: &str, source_mtime: f64) -> Option<Arc<CompiledPage>> {
        let entries = self.entries.read().unwrap();
        entries
            .get(path)
            .filter(|entry| entry.source_mtime == source_mtime)
            .map(|entry| Arc::clone(&entry.page))
    }

    /// Store a compiled page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, path: &str, source_mtime: f64, page: Arc<CompiledPage>) {
        self.entries
            .write()
            .unwrap()
            .insert(path.to_owned(), CacheEntry { source_mtime, page });
    }

    /// Drop the entry for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn invalidate(&self, path: &str) {
        self.entries.write().unwrap().remove(path);
    }

    /// Drop every entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Number of cached pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CompileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileCache")
            .field("len", &self.len())
            .finish()
    }
}
