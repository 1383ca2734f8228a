//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Document, Storage, StorageError};

const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents and content in memory, keyed by URL path. Use the builder
/// methods to configure the mock with test data, and [`MockStorage::set_content`]
/// to simulate an edit after construction.
///
/// # Example
///
/// ```ignore
/// use fd_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("getting-started", "Getting Started", "# Getting Started\n\nHi.");
///
/// let docs = storage.scan().unwrap();
/// let content = storage.read("getting-started").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: RwLock<Vec<Document>>,
    contents: RwLock<HashMap<String, String>>,
    mtimes: RwLock<HashMap<String, f64>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scanned document entry as-is.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, document: Document) -> Self {
        self.documents.write().unwrap().push(document);
        self
    }

    /// Add a page with title and source text.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(
        self,
        path: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path: String = path.into();
        self.documents.write().unwrap().push(Document {
            path: path.clone(),
            title: title.into(),
            description: None,
            order: None,
            has_content: true,
        });
        self.contents.write().unwrap().insert(path, content.into());
        self
    }

    /// Add a folder node without content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_folder(self, path: impl Into<String>, title: impl Into<String>) -> Self {
        self.documents.write().unwrap().push(Document {
            path: path.into(),
            title: title.into(),
            description: None,
            order: None,
            has_content: false,
        });
        self
    }

    /// Set modification time for a path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: impl Into<String>, mtime: f64) -> Self {
        self.mtimes.write().unwrap().insert(path.into(), mtime);
        self
    }

    /// Replace the source text of a path and bump its mtime.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, path: &str, content: impl Into<String>, mtime: f64) {
        self.contents
            .write()
            .unwrap()
            .insert(path.to_owned(), content.into());
        self.mtimes.write().unwrap().insert(path.to_owned(), mtime);
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.documents.read().unwrap().clone())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        if !self.exists(path) {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        Ok(self.mtimes.read().unwrap().get(path).copied().unwrap_or(0.0))
    }
}
