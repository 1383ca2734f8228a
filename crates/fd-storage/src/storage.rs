//! Storage trait and error types.
//!
//! # URL Path Convention
//!
//! All path parameters in Storage methods are **URL paths** relative to the
//! docs base, not file paths:
//! - `""` - docs root (`index.md`)
//! - `"getting-started"` - standalone page
//! - `"git"` - directory section
//! - `"git/branching"` - nested page

/// Document entry returned by storage scan.
///
/// Entries are either pages with content or folder nodes. A folder node is a
/// directory without `index.md`; it appears in navigation but has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// URL path (e.g., "", "getting-started", "git", "git/branching").
    pub path: String,
    /// Document title (resolved: front matter > H1 > filename).
    pub title: String,
    /// Description from front matter or sidecar.
    pub description: Option<String>,
    /// Sort key among siblings.
    pub order: Option<i64>,
    /// True if a markdown file backs this entry.
    pub has_content: bool,
}

/// What went wrong, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No document backs the path.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// The path could escape the content root.
    InvalidPath,
    /// Any other backend failure.
    Other,
}

/// Whether repeating the operation may succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    #[default]
    Permanent,
    /// Timeouts and interrupted reads.
    Temporary,
}

/// Failure to scan or read content.
#[derive(Debug)]
pub struct StorageError {
    /// Backend-independent category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Docs path the operation was for.
    pub path: Option<String>,
    /// Backend name ("Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<std::io::Error>,
}

impl StorageError {
    fn new(kind: StorageErrorKind, path: Option<String>) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            path,
            backend: None,
            source: None,
        }
    }

    /// No document at `path`.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound, Some(path.into()))
    }

    /// `path` was rejected before touching the backend.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidPath, Some(path.into()))
    }

    /// Classify an I/O failure.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<&str>) -> Self {
        use std::io::ErrorKind;

        let kind = match err.kind() {
            ErrorKind::NotFound => StorageErrorKind::NotFound,
            ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            ErrorKind::TimedOut | ErrorKind::Interrupted | ErrorKind::WouldBlock => {
                ErrorStatus::Temporary
            }
            _ => ErrorStatus::Permanent,
        };
        Self {
            status,
            source: Some(err),
            ..Self::new(kind, path.map(str::to_owned))
        }
    }

    /// Tag the error with the backend that produced it.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// True when the error means the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_deref().unwrap_or_default();
        match self.kind {
            StorageErrorKind::NotFound => write!(f, "no document at '{path}'")?,
            StorageErrorKind::PermissionDenied => write!(f, "permission denied for '{path}'")?,
            StorageErrorKind::InvalidPath => write!(f, "invalid path '{path}'")?,
            StorageErrorKind::Other => write!(f, "cannot access '{path}'")?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(backend) = self.backend {
            write!(f, " [{backend}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Content source for the documentation pipeline.
///
/// Implementations handle backend-specific details like title extraction,
/// caching, and the mapping from URL paths to stored files.
pub trait Storage: Send + Sync {
    /// Scan and return all documents, folder nodes included.
    ///
    /// Hierarchy is derived by the consumer from path prefixes. Paths are
    /// unique within one scan.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., permission denied,
    /// backend unavailable).
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Read the raw source text, front matter included.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a document exists at the given URL path.
    ///
    /// Returns `false` on errors.
    fn exists(&self, path: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or mtime can't be retrieved.
    fn mtime(&self, path: &str) -> Result<f64, StorageError>;
}
